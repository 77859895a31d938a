//! DOCX (WordprocessingML) writer.
//!
//! Produces a minimal package: document body, default styles, a single
//! bullet numbering definition, core properties, and one external
//! relationship per distinct hyperlink target.

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use chrono::SecondsFormat;
use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::model::{Document, ListIndent, Paragraph, TextRun};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const HYPERLINK_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const LINK_COLOR: &str = "0563C1";

// Relationship ids 1 and 2 are taken by styles and numbering.
const FIRST_LINK_REL: usize = 3;

/// Write `doc` as a `.docx` file at `path`.
pub fn write_docx<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    let bytes = to_docx_bytes(doc)?;
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}

/// Serialize `doc` into an in-memory `.docx` package.
pub fn to_docx_bytes(doc: &Document) -> Result<Vec<u8>> {
    let mut writer = DocxWriter::new();
    let body = writer.document_xml(doc);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let parts = [
        ("[Content_Types].xml", content_types_xml()),
        ("_rels/.rels", package_rels_xml()),
        ("docProps/core.xml", core_xml(doc)),
        ("word/document.xml", body),
        ("word/styles.xml", styles_xml(doc)),
        ("word/numbering.xml", numbering_xml(doc)),
        ("word/_rels/document.xml.rels", writer.document_rels_xml()),
    ];
    for (name, xml) in parts {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(name, options)?;
        zip.write_all(xml.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Converts inches to twentieths of a point.
fn twips(inches: f32) -> i64 {
    (inches * 1440.0).round() as i64
}

/// Converts points to twentieths of a point.
fn pt20(points: f32) -> i64 {
    (points * 20.0).round() as i64
}

/// Converts points to half-points.
fn half_points(points: f32) -> i64 {
    (points * 2.0).round() as i64
}

struct DocxWriter {
    links: Vec<String>,
    link_ids: HashMap<String, usize>,
}

impl DocxWriter {
    fn new() -> Self {
        Self {
            links: Vec::new(),
            link_ids: HashMap::new(),
        }
    }

    fn link_rel(&mut self, target: &str) -> String {
        let next = FIRST_LINK_REL + self.links.len();
        let id = *self.link_ids.entry(target.to_string()).or_insert_with(|| {
            self.links.push(target.to_string());
            next
        });
        format!("rId{}", id)
    }

    fn document_xml(&mut self, doc: &Document) -> String {
        let mut xml = String::with_capacity(4096);
        xml.push_str(XML_DECL);
        xml.push_str(&format!(
            r#"<w:document xmlns:w="{}" xmlns:r="{}"><w:body>"#,
            W_NS, R_NS
        ));

        for paragraph in &doc.paragraphs {
            self.write_paragraph(&mut xml, paragraph);
        }

        let page = &doc.page;
        let margin = twips(page.margin);
        xml.push_str(&format!(
            r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="0" w:footer="0" w:gutter="0"/></w:sectPr>"#,
            twips(page.width),
            twips(page.height),
            m = margin
        ));
        xml.push_str("</w:body></w:document>");
        xml
    }

    fn write_paragraph(&mut self, xml: &mut String, paragraph: &Paragraph) {
        let style = &paragraph.style;
        xml.push_str("<w:p><w:pPr>");
        if style.list.is_some() {
            xml.push_str(r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="1"/></w:numPr>"#);
        }
        xml.push_str(&format!(
            r#"<w:spacing w:before="{}" w:after="{}"/>"#,
            pt20(style.space_before.unwrap_or(0.0)),
            pt20(style.space_after.unwrap_or(0.0))
        ));
        if let Some(indent) = style.list {
            xml.push_str(&indent_xml(indent));
        }
        xml.push_str("</w:pPr>");

        for run in &paragraph.content {
            if run.is_empty() {
                continue;
            }
            match run.link.as_deref() {
                Some(target) => {
                    let id = self.link_rel(target);
                    xml.push_str(&format!(r#"<w:hyperlink r:id="{}">"#, id));
                    write_run(xml, run, true);
                    xml.push_str("</w:hyperlink>");
                }
                None => write_run(xml, run, false),
            }
        }
        xml.push_str("</w:p>");
    }

    fn document_rels_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(XML_DECL);
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, REL_NS));
        xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#);
        xml.push_str(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>"#);
        for (i, target) in self.links.iter().enumerate() {
            xml.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="{}" Target="{}" TargetMode="External"/>"#,
                FIRST_LINK_REL + i,
                HYPERLINK_REL,
                escape(target.as_str())
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}

fn write_run(xml: &mut String, run: &TextRun, link: bool) {
    xml.push_str("<w:r><w:rPr>");
    if run.style.bold {
        xml.push_str("<w:b/><w:bCs/>");
    }
    if link {
        xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, LINK_COLOR));
    }
    if let Some(size) = run.style.font_size {
        let hp = half_points(size);
        xml.push_str(&format!(r#"<w:sz w:val="{hp}"/><w:szCs w:val="{hp}"/>"#));
    }
    if link {
        xml.push_str(r#"<w:u w:val="single"/>"#);
    }
    xml.push_str("</w:rPr>");
    xml.push_str(&format!(
        r#"<w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape(run.text.as_str())
    ));
}

fn indent_xml(indent: ListIndent) -> String {
    format!(
        r#"<w:ind w:left="{}" w:hanging="{}"/>"#,
        twips(indent.left),
        twips(indent.hanging)
    )
}

fn content_types_xml() -> String {
    format!(
        "{}{}",
        XML_DECL,
        concat!(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
            r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
            r#"<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#,
            r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
            "</Types>"
        )
    )
}

fn package_rels_xml() -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#,
        XML_DECL, REL_NS
    )
}

fn core_xml(doc: &Document) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    if let Some(title) = doc.metadata.title.as_deref() {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape(title)));
    }
    xml.push_str("<dc:creator>onepage</dc:creator>");
    if let Some(created) = doc.metadata.created {
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            created.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    xml.push_str("</cp:coreProperties>");
    xml
}

fn styles_xml(doc: &Document) -> String {
    let font = escape(doc.font_family.as_str());
    let size = half_points(doc.font_size);
    format!(
        concat!(
            r#"{decl}<w:styles xmlns:w="{ns}"><w:docDefaults>"#,
            r#"<w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}" w:eastAsia="{font}"/>"#,
            r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:rPrDefault>"#,
            r#"<w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#,
            r#"</w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style></w:styles>"#
        ),
        decl = XML_DECL,
        ns = W_NS,
        font = font,
        size = size
    )
}

fn numbering_xml(doc: &Document) -> String {
    let indent = doc
        .paragraphs
        .iter()
        .find_map(|p| p.style.list)
        .unwrap_or(ListIndent {
            left: 0.25,
            hanging: 0.25,
        });
    format!(
        concat!(
            r#"{decl}<w:numbering xmlns:w="{ns}"><w:abstractNum w:abstractNumId="0">"#,
            r#"<w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/>"#,
            r#"<w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/>"#,
            r#"<w:pPr>{ind}</w:pPr></w:lvl></w:abstractNum>"#,
            r#"<w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#
        ),
        decl = XML_DECL,
        ns = W_NS,
        ind = indent_xml(indent)
    )
}
