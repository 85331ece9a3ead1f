use sos_model::ExportSnapshot;

use crate::blocks::{CellAlign, ContentBlock, TableBlock, TableColumn};
use crate::format::{
    format_currency, format_date, format_mileage, format_quantity, or_placeholder,
};

/// Shop identity printed in the document banner. The original template
/// hard-coded these; callers may override them per installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letterhead {
    pub shop_name: String,
    pub contact_line: String,
}

impl Letterhead {
    pub fn new(shop_name: impl Into<String>, contact_line: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
            contact_line: contact_line.into(),
        }
    }
}

impl Default for Letterhead {
    fn default() -> Self {
        Self::new(
            "Stock Car",
            "Cel: (18) 99771-0440 | Av. Joaquim Constantino 4161 - Presidente Prudente / SP",
        )
    }
}

/// Assemble the exported document's content blocks in their fixed order:
/// letterhead, title, service dates, customer section, vehicle section,
/// items table (confirmed rows only), grand total.
///
/// Pure: no I/O, no internal error conditions. The caller is responsible for
/// validating the header and guaranteeing at least one confirmed item (the
/// ledger's export precondition).
pub fn compose(letterhead: &Letterhead, snapshot: &ExportSnapshot) -> Vec<ContentBlock> {
    let header = &snapshot.header;
    let mut blocks = Vec::new();

    blocks.push(ContentBlock::Letterhead {
        title: letterhead.shop_name.clone(),
        subtitle: letterhead.contact_line.clone(),
    });
    blocks.push(ContentBlock::Title("Ordem de Serviço".to_string()));

    blocks.push(ContentBlock::FieldLine(format!(
        "Data de entrada: {}",
        format_date(&header.entry_date)
    )));
    blocks.push(ContentBlock::FieldLine(format!(
        "Data de saída: {}",
        format_date(&header.exit_date)
    )));
    blocks.push(ContentBlock::Divider);

    blocks.push(ContentBlock::Heading("Dados do Cliente".to_string()));
    for line in [
        format!("Nome: {}", or_placeholder(&header.customer_name)),
        format!("Celular / Telefone: {}", or_placeholder(&header.phone)),
        format!(
            "{}: {}",
            header.tax_id_kind.label(),
            or_placeholder(&header.tax_id)
        ),
        format!(
            "{}: {}",
            header.id_document_kind.label(),
            or_placeholder(&header.id_document)
        ),
        format!(
            "Endereço: {} Nº {}",
            or_placeholder(&header.street),
            or_placeholder(&header.number)
        ),
        format!("Bairro: {}", or_placeholder(&header.neighborhood)),
        format!("CEP: {}", or_placeholder(&header.postal_code)),
        format!(
            "Cidade/UF: {} - {}",
            or_placeholder(&header.city),
            or_placeholder(&header.state)
        ),
    ] {
        blocks.push(ContentBlock::FieldLine(line));
    }
    blocks.push(ContentBlock::Divider);

    blocks.push(ContentBlock::Heading("Dados do Veículo".to_string()));
    for line in [
        format!("Marca: {}", or_placeholder(&header.make)),
        format!("Modelo: {}", or_placeholder(&header.model)),
        format!("Ano: {}", or_placeholder(&header.model_year)),
        format!("Motor: {}", or_placeholder(&header.engine)),
        format!("Placa: {}", or_placeholder(&header.plate)),
        format!("KM: {}", format_mileage(header.mileage_km)),
    ] {
        blocks.push(ContentBlock::FieldLine(line));
    }
    blocks.push(ContentBlock::Divider);

    blocks.push(ContentBlock::Heading("Produtos / Serviços".to_string()));
    blocks.push(ContentBlock::Table(items_table(snapshot)));

    blocks.push(ContentBlock::TotalLine(format!(
        "Total Geral: {}",
        format_currency(snapshot.grand_total)
    )));

    blocks
}

fn items_table(snapshot: &ExportSnapshot) -> TableBlock {
    let columns = vec![
        TableColumn::new("Qtde", CellAlign::Center),
        TableColumn::new("Código", CellAlign::Center),
        TableColumn::new("Descrição", CellAlign::Left),
        TableColumn::new("Valor Unitário", CellAlign::Right),
        TableColumn::new("Total", CellAlign::Right),
    ];
    let rows = snapshot
        .items
        .iter()
        .map(|item| {
            vec![
                format_quantity(item.quantity),
                or_placeholder(&item.code).to_string(),
                item.description.clone(),
                format_currency(item.unit_price),
                format_currency(item.total),
            ]
        })
        .collect();
    TableBlock { columns, rows }
}
