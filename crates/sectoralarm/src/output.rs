//! Output rendering: table or JSON.
//!
//! JSON is produced by the core formatter and printed untouched. Tables are
//! built with `tabled` from the structured records.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use sectoralarm_core::Formatted;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list result: JSON passes through, records become table rows.
pub fn render_list<T, R>(result: Formatted<Vec<T>>, to_row: impl Fn(&T) -> R) -> String
where
    R: Tabled,
{
    match result {
        Formatted::Json(json) => json,
        Formatted::Structured(items) => {
            let rows: Vec<R> = items.iter().map(to_row).collect();
            render_table(&rows)
        }
    }
}

/// Render a single result. `detail_fn` lists the (field, value) pairs
/// shown in table mode.
pub fn render_single<T>(
    result: Formatted<T>,
    detail_fn: impl Fn(&T) -> Vec<(&'static str, String)>,
) -> String {
    match result {
        Formatted::Json(json) => json,
        Formatted::Structured(item) => {
            let rows: Vec<DetailRow> = detail_fn(&item)
                .into_iter()
                .map(|(field, value)| DetailRow { field, value })
                .collect();
            render_table(&rows)
        }
    }
}

/// Print the rendered output to stdout.
pub fn print_output(output: &str) -> io::Result<()> {
    write_output(&mut io::stdout().lock(), output)
}

/// A closed pipe (`sectoralarm history | head`) ends output quietly.
fn write_output(out: &mut impl Write, output: &str) -> io::Result<()> {
    if output.is_empty() {
        return Ok(());
    }
    match writeln!(out, "{output}").and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

#[derive(Tabled)]
struct DetailRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.into()
}

pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Tabled)]
    struct Row {
        name: String,
    }

    /// Writer that fails every write with the given kind.
    struct Failing(io::ErrorKind);

    impl Write for Failing {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_output_appends_newline() {
        let mut buf = Vec::new();
        write_output(&mut buf, "[]").unwrap();
        write_output(&mut buf, "").unwrap();
        assert_eq!(buf, b"[]\n");
    }

    #[test]
    fn write_failures_surface_except_closed_pipe() {
        let err = write_output(&mut Failing(io::ErrorKind::PermissionDenied), "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);

        assert!(write_output(&mut Failing(io::ErrorKind::BrokenPipe), "x").is_ok());
    }

    #[test]
    fn json_passes_through_untouched() {
        let out = render_list(Formatted::<Vec<String>>::Json("[]".into()), |s| Row {
            name: s.clone(),
        });
        assert_eq!(out, "[]");
    }

    #[test]
    fn structured_list_becomes_table() {
        let out = render_list(
            Formatted::Structured(vec!["front".to_string(), "back".to_string()]),
            |s| Row { name: s.clone() },
        );
        assert!(out.contains("name"));
        assert!(out.contains("front"));
        assert!(out.contains("back"));
    }

    #[test]
    fn single_record_renders_field_value_pairs() {
        let out = render_single(Formatted::Structured(true), |armed| {
            vec![("Armed", yes_no(*armed)), ("By", or_dash(None))]
        });
        assert!(out.contains("Field"));
        assert!(out.contains("Armed"));
        assert!(out.contains("yes"));
        assert!(out.contains('-'));
    }
}
