/// Horizontal alignment of a table cell or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAlign {
    Left,
    Center,
    Right,
}

/// A table column: header text plus the alignment applied to its body cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub align: CellAlign,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, align: CellAlign) -> Self {
        Self {
            header: header.into(),
            align,
        }
    }
}

/// The tabular items section: one row of cells per confirmed line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

/// One structured content block of the exported document.
///
/// The composer emits these in a fixed order; a renderer turns them into a
/// binary artifact without the composer knowing anything about the byte
/// format.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// Shop letterhead banner: shop name plus a contact line.
    Letterhead { title: String, subtitle: String },
    /// Document title ("Ordem de Serviço").
    Title(String),
    /// Section heading ("Dados do Cliente", ...).
    Heading(String),
    /// One labeled line inside a section, already formatted for display.
    FieldLine(String),
    /// Horizontal rule between sections.
    Divider,
    /// The items table.
    Table(TableBlock),
    /// Emphasized grand-total line.
    TotalLine(String),
}
