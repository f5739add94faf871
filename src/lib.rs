pub mod cli;
pub mod io;
pub mod models;
pub mod normalize;
pub mod render;

pub use cli::{Cli, Commands, RecordOverrides, apply_overrides, parse_pipe_fields};
pub use io::{InputError, load_record_file, write_html_report, write_pdf_report};
pub use models::{BilingualItem, Finding, Reliability, ReportInput, Source, Subject};
pub use normalize::{DEFAULT_LIMITATIONS, normalize};
pub use render::{generated_timestamp, render_html, render_pdf, subject_rows};
