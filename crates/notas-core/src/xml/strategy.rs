//! Ordered namespace strategies for resolving logical paths.
//!
//! The same logical path may be written by issuer software with the
//! portalfiscal namespace, with some other namespace URI declared by the
//! document, or with no namespace at all. A [`StrategyChain`] tries each
//! addressing style in order and returns the first match; results from
//! different styles are never merged.

use roxmltree::Node;

use super::path::LogicalPath;

/// One way of binding the steps of a logical path to namespaced elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStrategy {
    /// Namespace URI supplied by the caller.
    Declared(String),
    /// Default namespace in scope at the context element, whatever its URI.
    ///
    /// This also binds to another family's namespace (a CTe under its own
    /// default namespace), so a lookup that must tell families apart has to
    /// name an element only its own family uses.
    Embedded,
    /// Elements without a namespace.
    Unqualified,
}

impl PathStrategy {
    /// Namespace the steps must carry, or `None` when the strategy does not
    /// apply at this context.
    fn namespace<'x>(&'x self, context: Node<'x, '_>) -> Option<Option<&'x str>> {
        match self {
            PathStrategy::Declared(uri) => Some(Some(uri.as_str())),
            PathStrategy::Embedded => context.lookup_namespace_uri(None).map(Some),
            PathStrategy::Unqualified => Some(None),
        }
    }

    /// First element matching `path` under `context`, in document order.
    pub fn find<'a, 'input>(
        &self,
        context: Node<'a, 'input>,
        path: &LogicalPath<'_>,
    ) -> Option<Node<'a, 'input>> {
        let ns = self.namespace(context)?;
        let Some((first, rest)) = path.steps().split_first() else {
            return Some(context);
        };

        if path.is_descendant() {
            context
                .descendants()
                .filter(|n| matches(n, first, ns))
                .find_map(|n| descend(n, rest, ns))
        } else {
            descend(context, path.steps(), ns)
        }
    }

    /// Every element matching `path` under `context`, in document order.
    pub fn find_all<'a, 'input>(
        &self,
        context: Node<'a, 'input>,
        path: &LogicalPath<'_>,
    ) -> Vec<Node<'a, 'input>> {
        let mut found = Vec::new();
        let Some(ns) = self.namespace(context) else {
            return found;
        };
        let Some((first, rest)) = path.steps().split_first() else {
            found.push(context);
            return found;
        };

        if path.is_descendant() {
            for node in context.descendants().filter(|n| matches(n, first, ns)) {
                collect(node, rest, ns, &mut found);
            }
        } else {
            collect(context, path.steps(), ns, &mut found);
        }
        found
    }
}

fn matches(node: &Node<'_, '_>, local: &str, ns: Option<&str>) -> bool {
    node.is_element() && node.tag_name().name() == local && node.tag_name().namespace() == ns
}

fn descend<'a, 'input>(
    node: Node<'a, 'input>,
    steps: &[&str],
    ns: Option<&str>,
) -> Option<Node<'a, 'input>> {
    match steps.split_first() {
        None => Some(node),
        Some((step, rest)) => node
            .children()
            .filter(|c| matches(c, step, ns))
            .find_map(|c| descend(c, rest, ns)),
    }
}

fn collect<'a, 'input>(
    node: Node<'a, 'input>,
    steps: &[&str],
    ns: Option<&str>,
    found: &mut Vec<Node<'a, 'input>>,
) {
    match steps.split_first() {
        None => found.push(node),
        Some((step, rest)) => {
            for child in node.children().filter(|c| matches(c, step, ns)) {
                collect(child, rest, ns, found);
            }
        }
    }
}

/// Strategies tried in order; the first one that matches is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyChain {
    strategies: Vec<PathStrategy>,
}

impl StrategyChain {
    pub fn new(strategies: Vec<PathStrategy>) -> Self {
        Self { strategies }
    }

    /// Declared namespace, then the document's own, then none.
    pub fn for_namespace(uri: impl Into<String>) -> Self {
        Self::new(vec![
            PathStrategy::Declared(uri.into()),
            PathStrategy::Embedded,
            PathStrategy::Unqualified,
        ])
    }

    /// First element matching `path` in the first strategy that matches.
    pub fn find<'a, 'input>(&self, context: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
        let path = LogicalPath::parse(path);
        self.strategies.iter().find_map(|s| s.find(context, &path))
    }

    /// All elements matching `path`, taken from the first strategy that
    /// matches anything.
    pub fn find_all<'a, 'input>(&self, context: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
        let path = LogicalPath::parse(path);
        self.strategies
            .iter()
            .map(|s| s.find_all(context, &path))
            .find(|nodes| !nodes.is_empty())
            .unwrap_or_default()
    }
}
