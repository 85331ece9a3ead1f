//! WordprocessingML serialization of composed content blocks.
//!
//! A `.docx` file is an OPC zip container with three required parts here:
//! the content-type map, the package relationships, and the document body.
//! Only the body varies; the other two parts are fixed.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use sos_compose::blocks::{CellAlign, ContentBlock, TableBlock};

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Banner and table-header fill from the original template.
const ACCENT_FILL: &str = "2872B9";
/// Grand-total highlight fill.
const TOTAL_FILL: &str = "E6E6E6";
/// Page margins in twips (720 = 0.5 inch).
const PAGE_MARGIN: &str = "720";

/// Render composed blocks into `.docx` bytes.
pub fn render_docx(blocks: &[ContentBlock]) -> Result<Vec<u8>> {
    let document = document_xml(blocks).context("serialize document body")?;

    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    archive.start_file("[Content_Types].xml", options)?;
    archive.write_all(CONTENT_TYPES_XML.as_bytes())?;
    archive.start_file("_rels/.rels", options)?;
    archive.write_all(PACKAGE_RELS_XML.as_bytes())?;
    archive.start_file("word/document.xml", options)?;
    archive.write_all(&document)?;
    let cursor = archive.finish().context("finalize docx container")?;
    Ok(cursor.into_inner())
}

/// Render blocks and write the artifact to `path`.
pub fn write_docx(path: &std::path::Path, blocks: &[ContentBlock]) -> Result<()> {
    let bytes = render_docx(blocks)?;
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Paragraph-level styling. Fields map one-to-one onto `w:pPr` children.
#[derive(Default, Clone, Copy)]
struct ParaStyle {
    shading: Option<&'static str>,
    spacing_before: Option<u32>,
    spacing_after: Option<u32>,
    bottom_border: bool,
    align: Option<CellAlign>,
}

/// Run-level styling. Fields map onto `w:rPr` children; `size` is in
/// half-points as WordprocessingML expects.
#[derive(Default, Clone, Copy)]
struct RunStyle {
    bold: bool,
    color: Option<&'static str>,
    size: Option<u32>,
}

fn document_xml(blocks: &[ContentBlock]) -> Result<Vec<u8>> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", WORDML_NS));
    xml.write_event(Event::Start(root))?;
    xml.write_event(Event::Start(BytesStart::new("w:body")))?;

    for block in blocks {
        write_block(&mut xml, block)?;
    }

    write_section_properties(&mut xml)?;
    xml.write_event(Event::End(BytesEnd::new("w:body")))?;
    xml.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(xml.into_inner())
}

fn write_block(xml: &mut Writer<Vec<u8>>, block: &ContentBlock) -> Result<()> {
    match block {
        ContentBlock::Letterhead { title, subtitle } => {
            write_paragraph(
                xml,
                title,
                ParaStyle {
                    shading: Some(ACCENT_FILL),
                    ..ParaStyle::default()
                },
                RunStyle {
                    bold: true,
                    color: Some("FFFFFF"),
                    size: Some(32),
                },
            )?;
            write_paragraph(
                xml,
                subtitle,
                ParaStyle {
                    shading: Some(ACCENT_FILL),
                    spacing_after: Some(200),
                    ..ParaStyle::default()
                },
                RunStyle {
                    color: Some("FFFFFF"),
                    size: Some(18),
                    ..RunStyle::default()
                },
            )?;
            // spacer below the banner
            write_paragraph(
                xml,
                "",
                ParaStyle {
                    spacing_after: Some(200),
                    ..ParaStyle::default()
                },
                RunStyle::default(),
            )
        }
        ContentBlock::Title(text) => write_paragraph(
            xml,
            text,
            ParaStyle {
                spacing_after: Some(200),
                ..ParaStyle::default()
            },
            RunStyle {
                bold: true,
                size: Some(28),
                ..RunStyle::default()
            },
        ),
        ContentBlock::Heading(text) => write_paragraph(
            xml,
            text,
            ParaStyle {
                spacing_after: Some(100),
                ..ParaStyle::default()
            },
            RunStyle {
                bold: true,
                size: Some(24),
                ..RunStyle::default()
            },
        ),
        ContentBlock::FieldLine(text) => write_paragraph(
            xml,
            text,
            ParaStyle {
                spacing_after: Some(100),
                ..ParaStyle::default()
            },
            RunStyle::default(),
        ),
        ContentBlock::Divider => write_paragraph(
            xml,
            "",
            ParaStyle {
                bottom_border: true,
                spacing_after: Some(200),
                ..ParaStyle::default()
            },
            RunStyle::default(),
        ),
        ContentBlock::Table(table) => {
            write_table(xml, table)?;
            // spacer between the table and the total line
            write_paragraph(xml, "", ParaStyle::default(), RunStyle::default())
        }
        ContentBlock::TotalLine(text) => write_paragraph(
            xml,
            text,
            ParaStyle {
                shading: Some(TOTAL_FILL),
                spacing_before: Some(200),
                ..ParaStyle::default()
            },
            RunStyle {
                bold: true,
                size: Some(24),
                ..RunStyle::default()
            },
        ),
    }
}

fn write_paragraph(
    xml: &mut Writer<Vec<u8>>,
    text: &str,
    para: ParaStyle,
    run: RunStyle,
) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:p")))?;
    write_paragraph_properties(xml, para)?;
    if !text.is_empty() {
        xml.write_event(Event::Start(BytesStart::new("w:r")))?;
        write_run_properties(xml, run)?;
        let mut t = BytesStart::new("w:t");
        t.push_attribute(("xml:space", "preserve"));
        xml.write_event(Event::Start(t))?;
        xml.write_event(Event::Text(BytesText::new(text)))?;
        xml.write_event(Event::End(BytesEnd::new("w:t")))?;
        xml.write_event(Event::End(BytesEnd::new("w:r")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_paragraph_properties(xml: &mut Writer<Vec<u8>>, para: ParaStyle) -> Result<()> {
    let has_props = para.shading.is_some()
        || para.spacing_before.is_some()
        || para.spacing_after.is_some()
        || para.bottom_border
        || para.align.is_some();
    if !has_props {
        return Ok(());
    }
    xml.write_event(Event::Start(BytesStart::new("w:pPr")))?;
    if let Some(align) = para.align {
        let mut jc = BytesStart::new("w:jc");
        jc.push_attribute(("w:val", align_value(align)));
        xml.write_event(Event::Empty(jc))?;
    }
    if para.bottom_border {
        xml.write_event(Event::Start(BytesStart::new("w:pBdr")))?;
        let mut bottom = BytesStart::new("w:bottom");
        bottom.push_attribute(("w:val", "single"));
        bottom.push_attribute(("w:sz", "6"));
        bottom.push_attribute(("w:space", "1"));
        bottom.push_attribute(("w:color", "000000"));
        xml.write_event(Event::Empty(bottom))?;
        xml.write_event(Event::End(BytesEnd::new("w:pBdr")))?;
    }
    if let Some(fill) = para.shading {
        write_shading(xml, fill)?;
    }
    if para.spacing_before.is_some() || para.spacing_after.is_some() {
        let mut spacing = BytesStart::new("w:spacing");
        let before = para.spacing_before.map(|value| value.to_string());
        let after = para.spacing_after.map(|value| value.to_string());
        if let Some(before) = &before {
            spacing.push_attribute(("w:before", before.as_str()));
        }
        if let Some(after) = &after {
            spacing.push_attribute(("w:after", after.as_str()));
        }
        xml.write_event(Event::Empty(spacing))?;
    }
    xml.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    Ok(())
}

fn write_run_properties(xml: &mut Writer<Vec<u8>>, run: RunStyle) -> Result<()> {
    if !run.bold && run.color.is_none() && run.size.is_none() {
        return Ok(());
    }
    xml.write_event(Event::Start(BytesStart::new("w:rPr")))?;
    if run.bold {
        xml.write_event(Event::Empty(BytesStart::new("w:b")))?;
    }
    if let Some(color) = run.color {
        let mut node = BytesStart::new("w:color");
        node.push_attribute(("w:val", color));
        xml.write_event(Event::Empty(node))?;
    }
    if let Some(size) = run.size {
        let mut node = BytesStart::new("w:sz");
        let value = size.to_string();
        node.push_attribute(("w:val", value.as_str()));
        xml.write_event(Event::Empty(node))?;
    }
    xml.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    Ok(())
}

fn write_table(xml: &mut Writer<Vec<u8>>, table: &TableBlock) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:tbl")))?;
    write_table_properties(xml)?;

    // header row: shaded, centered, bold white text
    let header_run = RunStyle {
        bold: true,
        color: Some("FFFFFF"),
        ..RunStyle::default()
    };
    xml.write_event(Event::Start(BytesStart::new("w:tr")))?;
    for column in &table.columns {
        write_cell(
            xml,
            &column.header,
            CellAlign::Center,
            Some(ACCENT_FILL),
            header_run,
            table.columns.len(),
        )?;
    }
    xml.write_event(Event::End(BytesEnd::new("w:tr")))?;

    for row in &table.rows {
        xml.write_event(Event::Start(BytesStart::new("w:tr")))?;
        for (cell, column) in row.iter().zip(&table.columns) {
            write_cell(
                xml,
                cell,
                column.align,
                None,
                RunStyle::default(),
                table.columns.len(),
            )?;
        }
        xml.write_event(Event::End(BytesEnd::new("w:tr")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("w:tbl")))?;
    Ok(())
}

fn write_table_properties(xml: &mut Writer<Vec<u8>>) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:tblPr")))?;
    let mut width = BytesStart::new("w:tblW");
    // table width in fiftieths of a percent: 5000 = 100%
    width.push_attribute(("w:w", "5000"));
    width.push_attribute(("w:type", "pct"));
    xml.write_event(Event::Empty(width))?;
    xml.write_event(Event::Start(BytesStart::new("w:tblBorders")))?;
    for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        let mut border = BytesStart::new(format!("w:{side}"));
        border.push_attribute(("w:val", "single"));
        border.push_attribute(("w:sz", "4"));
        border.push_attribute(("w:space", "0"));
        border.push_attribute(("w:color", "000000"));
        xml.write_event(Event::Empty(border))?;
    }
    xml.write_event(Event::End(BytesEnd::new("w:tblBorders")))?;
    xml.write_event(Event::End(BytesEnd::new("w:tblPr")))?;
    Ok(())
}

fn write_cell(
    xml: &mut Writer<Vec<u8>>,
    text: &str,
    align: CellAlign,
    fill: Option<&'static str>,
    run: RunStyle,
    column_count: usize,
) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:tc")))?;
    xml.write_event(Event::Start(BytesStart::new("w:tcPr")))?;
    let mut width = BytesStart::new("w:tcW");
    let pct = (5000 / column_count.max(1)).to_string();
    width.push_attribute(("w:w", pct.as_str()));
    width.push_attribute(("w:type", "pct"));
    xml.write_event(Event::Empty(width))?;
    if let Some(fill) = fill {
        write_shading(xml, fill)?;
    }
    xml.write_event(Event::End(BytesEnd::new("w:tcPr")))?;
    write_paragraph(
        xml,
        text,
        ParaStyle {
            align: Some(align),
            ..ParaStyle::default()
        },
        run,
    )?;
    xml.write_event(Event::End(BytesEnd::new("w:tc")))?;
    Ok(())
}

fn align_value(align: CellAlign) -> &'static str {
    match align {
        CellAlign::Left => "left",
        CellAlign::Center => "center",
        CellAlign::Right => "right",
    }
}

fn write_shading(xml: &mut Writer<Vec<u8>>, fill: &str) -> Result<()> {
    let mut shd = BytesStart::new("w:shd");
    shd.push_attribute(("w:val", "clear"));
    shd.push_attribute(("w:color", "auto"));
    shd.push_attribute(("w:fill", fill));
    xml.write_event(Event::Empty(shd))?;
    Ok(())
}

fn write_section_properties(xml: &mut Writer<Vec<u8>>) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:sectPr")))?;
    let mut margins = BytesStart::new("w:pgMar");
    for side in ["w:top", "w:right", "w:bottom", "w:left"] {
        margins.push_attribute((side, PAGE_MARGIN));
    }
    xml.write_event(Event::Empty(margins))?;
    xml.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
    Ok(())
}
