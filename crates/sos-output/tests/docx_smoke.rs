//! Smoke tests: the rendered artifact is a well-formed OPC container whose
//! document part carries the composed content.

use std::io::{Cursor, Read};

use sos_compose::blocks::{CellAlign, ContentBlock, TableBlock, TableColumn};
use sos_output::render_docx;

fn sample_blocks() -> Vec<ContentBlock> {
    vec![
        ContentBlock::Letterhead {
            title: "Stock Car".to_string(),
            subtitle: "Cel: (18) 99771-0440".to_string(),
        },
        ContentBlock::Title("Ordem de Serviço".to_string()),
        ContentBlock::FieldLine("Data de entrada: 01/03/2024".to_string()),
        ContentBlock::Divider,
        ContentBlock::Heading("Produtos / Serviços".to_string()),
        ContentBlock::Table(TableBlock {
            columns: vec![
                TableColumn::new("Qtde", CellAlign::Center),
                TableColumn::new("Descrição", CellAlign::Left),
                TableColumn::new("Total", CellAlign::Right),
            ],
            rows: vec![vec![
                "2".to_string(),
                "peças & serviços".to_string(),
                "R$ 20.00".to_string(),
            ]],
        }),
        ContentBlock::TotalLine("Total Geral: R$ 20.00".to_string()),
    ]
}

fn document_part(bytes: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("open docx as zip");
    let mut part = archive
        .by_name("word/document.xml")
        .expect("document part present");
    let mut content = String::new();
    part.read_to_string(&mut content).expect("read document part");
    content
}

#[test]
fn container_has_required_parts() {
    let bytes = render_docx(&sample_blocks()).expect("render docx");
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).expect("open zip");
    for name in ["[Content_Types].xml", "_rels/.rels", "word/document.xml"] {
        assert!(archive.by_name(name).is_ok(), "missing part {name}");
    }
}

#[test]
fn document_part_carries_composed_text() {
    let bytes = render_docx(&sample_blocks()).expect("render docx");
    let document = document_part(&bytes);
    assert!(document.contains("Ordem de Serviço"));
    assert!(document.contains("Total Geral: R$ 20.00"));
    assert!(document.contains("<w:tbl>"));
    // three header cells plus one body row
    assert_eq!(document.matches("<w:tr>").count(), 2);
}

#[test]
fn text_content_is_escaped() {
    let bytes = render_docx(&sample_blocks()).expect("render docx");
    let document = document_part(&bytes);
    assert!(document.contains("peças &amp; serviços"));
    assert!(!document.contains("peças & serviços"));
}

#[test]
fn empty_block_list_still_renders_a_valid_body() {
    let bytes = render_docx(&[]).expect("render docx");
    let document = document_part(&bytes);
    assert!(document.contains("<w:body>"));
    assert!(document.contains("<w:pgMar"));
}
