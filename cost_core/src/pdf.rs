//! # PDF Report Generation
//!
//! Produces the printable cost report from a [`ReportView`] using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Report data is escaped and injected with placeholder substitution
//! - Fonts come from `typst-assets`, so no files are read at runtime
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use cost_core::pdf::render_report_pdf;
//! use cost_core::project::ProjectSpecification;
//! use cost_core::rates::{MaterialKind, RateTable};
//! use cost_core::views::ReportView;
//!
//! let spec = ProjectSpecification {
//!     name: "Warehouse".to_string(),
//!     length_m: 10.0,
//!     width_m: 5.0,
//!     height_m: 3.0,
//!     floors: 2,
//!     material: MaterialKind::Concrete,
//!     labor_hours: 200.0,
//!     location: "Denver".to_string(),
//! };
//!
//! let report = ReportView::build(&spec, RateTable::global()).unwrap();
//! let pdf_bytes = render_report_pdf(&report).unwrap();
//! std::fs::write("cost_report.pdf", pdf_bytes).unwrap();
//! ```

use chrono::{DateTime, Datelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{CostError, CostResult};
use crate::units::{Dollars, Percent};
use crate::views::ReportView;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling a single in-memory document.
struct ReportWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
    /// Date reported to the document (the report's generation time)
    today: DateTime<Utc>,
}

impl ReportWorld {
    fn new(source: String, today: DateTime<Utc>) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        ReportWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
            today,
        }
    }

    fn load_fonts() -> Vec<Font> {
        let mut fonts = Vec::new();
        for font_bytes in typst_assets::fonts() {
            let buffer = Bytes::new(font_bytes.to_vec());
            for font in Font::iter(buffer) {
                fonts.push(font);
            }
        }
        fonts
    }
}

impl World for ReportWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        Datetime::from_ymd(
            self.today.year(),
            u8::try_from(self.today.month()).ok()?,
            u8::try_from(self.today.day()).ok()?,
        )
    }
}

// ============================================================================
// Report Template
// ============================================================================

const REPORT_TEMPLATE: &str = r##"
#set page(
  paper: "us-letter",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Construction Cost Estimator]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[{{PROJECT_NAME}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 11pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Cost Estimation Report]
    #v(4pt)
    #text(size: 14pt)[{{PROJECT_NAME}}]
  ]
]

#v(12pt)

== Project Details

#table(
  columns: (1fr, 1fr),
  inset: 8pt,
  stroke: 0.5pt,
  [*Project Name*], [{{PROJECT_NAME}}],
  [*Location*], [{{LOCATION}}],
  [*Dimensions*], [{{DIMENSIONS}}],
  [*Number of Floors*], [{{FLOORS}}],
  [*Primary Material*], [{{MATERIAL}}],
)

#v(12pt)

== Cost Summary

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, right),
  table.header([*Category*], [*Cost*], [*Share*]),
{{DISTRIBUTION_ROWS}}
  [*Total Cost*], [*{{TOTAL}}*], [],
)

#v(12pt)

== Optimization Recommendations

{{RECOMMENDATIONS}}

#v(12pt)

== Notes & Assumptions

{{NOTES}}

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Report {{REPORT_ID}} \
  Estimates are indicative and should be confirmed with current supplier quotes.
]
"##;

/// Build the Typst source for a report.
pub fn render_report_typst(report: &ReportView) -> String {
    REPORT_TEMPLATE
        .replace("{{PROJECT_NAME}}", &escape_typst(&report.project.name))
        .replace("{{DATE}}", &report.generated_at.format("%Y-%m-%d").to_string())
        .replace("{{LOCATION}}", &escape_typst(&report.project.location))
        .replace("{{DIMENSIONS}}", &escape_typst(&report.project.dimensions_label()))
        .replace("{{FLOORS}}", &report.project.floors.to_string())
        .replace("{{MATERIAL}}", report.project.material.display_name())
        .replace("{{DISTRIBUTION_ROWS}}", &build_distribution_rows(report))
        .replace("{{TOTAL}}", &escape_typst(&report.summary.total.to_string()))
        .replace("{{RECOMMENDATIONS}}", &build_list(&report.recommendations))
        .replace("{{NOTES}}", &build_list(&report.notes))
        .replace("{{REPORT_ID}}", &report.report_id.to_string())
}

/// Render a report to PDF.
///
/// # Errors
///
/// `ReportFailed` if Typst compilation or PDF export fails.
pub fn render_report_pdf(report: &ReportView) -> CostResult<Vec<u8>> {
    let world = ReportWorld::new(render_report_typst(report), report.generated_at);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CostError::report_failed(format!("Typst compilation failed: {}", error_msgs.join("; ")))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CostError::report_failed(format!("PDF rendering failed: {}", error_msgs.join("; ")))
    })?;

    tracing::debug!(report_id = %report.report_id, bytes = pdf_bytes.len(), "rendered report PDF");
    Ok(pdf_bytes)
}

/// Escape characters with markup meaning in user-provided text
fn escape_typst(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '/' | '=' | '-' | '+' | '~'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn build_distribution_rows(report: &ReportView) -> String {
    report
        .distribution
        .iter()
        .map(|entry| {
            format!(
                "  [{}], [{}], [{}],",
                entry.category,
                escape_typst(&Dollars(entry.cost).to_string()),
                escape_typst(&Percent(entry.percentage_of_total).to_string()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", escape_typst(item)))
        .collect::<Vec<_>>()
        .join("\n")
}
