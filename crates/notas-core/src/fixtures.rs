//! XML documents shared by the unit tests.

/// Authorized NFe in a `nfeProc` envelope: three items, two CFOPs.
pub const NFE_TWO_ITEMS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<nfeProc xmlns="http://www.portalfiscal.inf.br/nfe" versao="4.00">
  <NFe>
    <infNFe Id="NFe35200812345678000190550010000000011234567890" versao="4.00">
      <ide>
        <cUF>35</cUF>
        <nNF>1</nNF>
        <serie>1</serie>
        <dhEmi>2020-08-10T09:30:00-03:00</dhEmi>
      </ide>
      <emit>
        <CNPJ>12345678000190</CNPJ>
        <xNome>Comercial Exemplo Ltda</xNome>
        <enderEmit><UF>SP</UF></enderEmit>
      </emit>
      <dest>
        <CNPJ>98765432000110</CNPJ>
        <xNome>Cliente Modelo SA</xNome>
        <enderDest><UF>RJ</UF></enderDest>
      </dest>
      <det nItem="1">
        <prod>
          <cProd>001</cProd>
          <xProd>Parafuso sextavado</xProd>
          <NCM>73181500</NCM>
          <CFOP>5102</CFOP>
          <uCom>UN</uCom>
          <qCom>10.0000</qCom>
          <vUnCom>10.0000000000</vUnCom>
          <vProd>100.00</vProd>
          <cBenef>SP000202</cBenef>
        </prod>
        <imposto>
          <ICMS>
            <ICMS00>
              <orig>0</orig>
              <CST>00</CST>
              <vBC>100.00</vBC>
              <pICMS>18.00</pICMS>
              <vICMS>18.00</vICMS>
            </ICMS00>
          </ICMS>
          <PIS><PISAliq><CST>01</CST><vPIS>1.65</vPIS></PISAliq></PIS>
          <COFINS><COFINSAliq><CST>01</CST><vCOFINS>7.60</vCOFINS></COFINSAliq></COFINS>
        </imposto>
        <infAdProd>Lote 42</infAdProd>
      </det>
      <det nItem="2">
        <prod>
          <cProd>002</cProd>
          <xProd>Porca M8</xProd>
          <NCM>73181600</NCM>
          <CFOP>5102</CFOP>
          <uCom>UN</uCom>
          <qCom>5.0000</qCom>
          <vUnCom>10.0000000000</vUnCom>
          <vProd>50.00</vProd>
        </prod>
        <imposto>
          <ICMS>
            <ICMS20>
              <orig>0</orig>
              <CST>20</CST>
              <vBC>40.00</vBC>
              <pICMS>18.00</pICMS>
              <vICMS>7.20</vICMS>
              <vICMSDeson>1.80</vICMSDeson>
            </ICMS20>
          </ICMS>
          <PIS><PISOutr><CST>99</CST><vPIS>0.83</vPIS></PISOutr></PIS>
          <COFINS><COFINSOutr><CST>99</CST><vCOFINS>3.80</vCOFINS></COFINSOutr></COFINS>
        </imposto>
      </det>
      <det nItem="3">
        <prod>
          <cProd>003</cProd>
          <xProd>Arruela lisa</xProd>
          <NCM>73182200</NCM>
          <CFOP>6102</CFOP>
          <uCom>CX</uCom>
          <qCom>2.0000</qCom>
          <vUnCom>100.0000000000</vUnCom>
          <vProd>200.00</vProd>
        </prod>
        <imposto>
          <ICMS>
            <ICMS10>
              <orig>0</orig>
              <CST>10</CST>
              <vBC>200.00</vBC>
              <pICMS>12.00</pICMS>
              <vICMS>24.00</vICMS>
              <vBCST>280.00</vBCST>
              <pICMSST>18.00</pICMSST>
              <vICMSST>26.40</vICMSST>
            </ICMS10>
          </ICMS>
          <PIS><PISNT><CST>06</CST></PISNT></PIS>
          <COFINS><COFINSNT><CST>06</CST></COFINSNT></COFINS>
        </imposto>
      </det>
      <total>
        <ICMSTot>
          <vBC>340.00</vBC>
          <vICMS>49.20</vICMS>
          <vProd>350.00</vProd>
          <vFrete>30.00</vFrete>
          <vSeg>0.00</vSeg>
          <vDesc>0.00</vDesc>
          <vIPI>12.35</vIPI>
        </ICMSTot>
      </total>
      <infAdic>
        <infCpl>Pedido 123</infCpl>
      </infAdic>
    </infNFe>
  </NFe>
  <protNFe versao="4.00">
    <infProt>
      <chNFe>35200812345678000190550010000000011234567890</chNFe>
      <cStat>100</cStat>
      <xMotivo>Autorizado o uso da NF-e</xMotivo>
    </infProt>
  </protNFe>
</nfeProc>
"#;

/// Pre-3.10 style NFe without namespace, recipient, CFOP or ICMS block.
pub const NFE_NO_NAMESPACE: &str = r#"<NFe>
  <infNFe Id="NFe35091112345678000190550010000000021000000027" versao="2.00">
    <ide>
      <nNF>2</nNF>
      <serie>0</serie>
      <dEmi>2009-11-02</dEmi>
    </ide>
    <emit>
      <CNPJ>12345678000190</CNPJ>
      <xNome>Comercial Exemplo Ltda</xNome>
    </emit>
    <det nItem="1">
      <prod>
        <cProd>010</cProd>
        <xProd>Servico avulso</xProd>
        <qCom>1</qCom>
        <vUnCom>abc</vUnCom>
        <vProd>80.00</vProd>
      </prod>
      <imposto>
        <PIS><PISAliq><vPIS>1.32</vPIS></PISAliq></PIS>
      </imposto>
    </det>
  </infNFe>
</NFe>
"#;

/// NFe mixing a prefixed namespace with an unqualified `emit` block.
pub const NFE_MIXED_STYLES: &str = r#"<n:NFe xmlns:n="http://www.portalfiscal.inf.br/nfe">
  <n:infNFe Id="NFe35200812345678000190550010000000031000000030">
    <n:ide><n:nNF>3</n:nNF><n:serie>2</n:serie><n:dhEmi>2020-08-12T08:00:00-03:00</n:dhEmi></n:ide>
    <emit><CNPJ>12345678000190</CNPJ><xNome>Comercial Exemplo Ltda</xNome></emit>
    <n:det nItem="1">
      <n:prod><n:CFOP>5405</n:CFOP><n:vProd>12.50</n:vProd></n:prod>
    </n:det>
  </n:infNFe>
</n:NFe>
"#;

/// Authorized CTe with a single ICMS00 block.
pub const CTE_BASIC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cteProc xmlns="http://www.portalfiscal.inf.br/cte" versao="3.00">
  <CTe>
    <infCte Id="CTe35200811222333000144570010000003211000003210" versao="3.00">
      <ide>
        <CFOP>5353</CFOP>
        <natOp>PRESTACAO DE SERVICO DE TRANSPORTE</natOp>
        <serie>1</serie>
        <nCT>321</nCT>
        <dhEmi>2020-08-11T14:00:00-03:00</dhEmi>
        <tpServ>0</tpServ>
      </ide>
      <compl>
        <xObs>Frete CIF</xObs>
      </compl>
      <emit>
        <CNPJ>11222333000144</CNPJ>
        <xNome>Transportadora Rapida SA</xNome>
        <enderEmit><UF>PR</UF></enderEmit>
      </emit>
      <rem>
        <CNPJ>12345678000190</CNPJ>
        <xNome>Comercial Exemplo Ltda</xNome>
        <enderReme><UF>SP</UF></enderReme>
      </rem>
      <dest>
        <CPF>12345678909</CPF>
        <xNome>Maria Souza</xNome>
        <enderDest><UF>SC</UF></enderDest>
      </dest>
      <vPrest>
        <vTPrest>1500.00</vTPrest>
        <vRec>1500.00</vRec>
      </vPrest>
      <imp>
        <ICMS>
          <ICMS00>
            <CST>00</CST>
            <vBC>1500.00</vBC>
            <pICMS>12.00</pICMS>
            <vICMS>180.00</vICMS>
          </ICMS00>
        </ICMS>
      </imp>
    </infCte>
  </CTe>
  <protCTe versao="3.00">
    <infProt>
      <cStat>100</cStat>
      <xMotivo>Autorizado o uso do CT-e</xMotivo>
    </infProt>
  </protCTe>
</cteProc>
"#;

/// Normal CTe listing the NF-e it carries under `infCTeNorm/infDoc`.
pub const CTE_WITH_NFE_REFS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<cteProc xmlns="http://www.portalfiscal.inf.br/cte" versao="3.00">
  <CTe>
    <infCte Id="CTe35200911222333000144570010000004561000004567" versao="3.00">
      <ide>
        <CFOP>6353</CFOP>
        <serie>1</serie>
        <nCT>456</nCT>
        <dhEmi>2020-09-01T10:15:00-03:00</dhEmi>
        <tpServ>0</tpServ>
      </ide>
      <emit>
        <CNPJ>11222333000144</CNPJ>
        <xNome>Transportadora Rapida SA</xNome>
        <enderEmit><UF>PR</UF></enderEmit>
      </emit>
      <rem>
        <CNPJ>12345678000190</CNPJ>
        <xNome>Comercial Exemplo Ltda</xNome>
        <enderReme><UF>SP</UF></enderReme>
      </rem>
      <vPrest>
        <vTPrest>820.00</vTPrest>
      </vPrest>
      <imp>
        <ICMS>
          <ICMS00>
            <vBC>820.00</vBC>
            <pICMS>12.00</pICMS>
            <vICMS>98.40</vICMS>
          </ICMS00>
        </ICMS>
      </imp>
      <infCTeNorm>
        <infCarga><vCarga>350.00</vCarga></infCarga>
        <infDoc>
          <infNFe><chave>35200812345678000190550010000000011234567890</chave></infNFe>
          <infNFe><chave>35200812345678000190550010000000031000000030</chave></infNFe>
        </infDoc>
      </infCTeNorm>
    </infCte>
  </CTe>
</cteProc>
"#;

/// Not well-formed.
pub const MALFORMED: &str = "<nfeProc><NFe><infNFe></NFe>";
