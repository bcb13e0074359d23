//! Table output

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Rows},
};

/// Write `rows` under `header` as a rounded table.
pub(crate) fn write_table<I, R>(mut out: impl io::Write, header: &[&str], rows: I) -> io::Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut builder = Builder::default();

    builder.push_record(header.iter().copied());

    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")
}

/// `label` when set, blank otherwise.
pub(crate) fn flag(value: bool, label: &str) -> String {
    if value {
        label.to_string()
    } else {
        String::new()
    }
}
