use crate::{
    CommandContext, OutputFormat,
    output::{
        OutputStyle, create_table, format_count_badge, header_cell, numeric_cell,
        print_section_header, regular_cell,
    },
};
use doomwad_formats::wad::Lump;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct LumpEntry<'a> {
    index: usize,
    #[serde(flatten)]
    lump: &'a Lump,
}

pub fn handle(wad: &Path, filter: Option<&str>, ctx: &CommandContext) -> anyhow::Result<()> {
    let archive = ctx.open_archive(wad)?;
    let filter = filter.map(str::to_ascii_uppercase);

    let entries: Vec<LumpEntry<'_>> = archive
        .lumps()
        .iter()
        .enumerate()
        .filter(|(_, lump)| {
            filter
                .as_deref()
                .is_none_or(|f| lump.name.to_ascii_uppercase().contains(f))
        })
        .map(|(index, lump)| LumpEntry { index, lump })
        .collect();

    match ctx.format {
        OutputFormat::Json | OutputFormat::JsonPretty => ctx.print_json(&entries)?,
        OutputFormat::Text => {
            let style = OutputStyle::for_context(ctx.no_color);

            print_section_header(
                &format!(
                    "{} {:?} {}",
                    wad.display(),
                    archive.kind(),
                    format_count_badge(entries.len(), "lump", &style)
                ),
                &style,
            );

            let mut table = create_table(&style);
            table.set_header(vec![
                header_cell("#", &style),
                header_cell("Name", &style),
                header_cell("Position", &style),
                header_cell("Size", &style),
            ]);

            for entry in &entries {
                table.add_row(vec![
                    numeric_cell(&entry.index.to_string()),
                    regular_cell(&entry.lump.name),
                    numeric_cell(&format!("{:#010x}", entry.lump.position)),
                    numeric_cell(&entry.lump.size.to_string()),
                ]);
            }

            println!("{table}");
        }
    }

    Ok(())
}
