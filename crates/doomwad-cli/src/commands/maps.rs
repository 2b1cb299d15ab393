use crate::{
    CommandContext, OutputFormat,
    output::{
        OutputStyle, create_table, format_count_badge, header_cell, numeric_cell, optional_cell,
        print_section_header, regular_cell,
    },
};
use std::path::Path;

pub fn handle(wad: &Path, ctx: &CommandContext) -> anyhow::Result<()> {
    let archive = ctx.open_archive(wad)?;
    let maps = archive.maps();

    match ctx.format {
        OutputFormat::Json | OutputFormat::JsonPretty => ctx.print_json(maps)?,
        OutputFormat::Text => {
            let style = OutputStyle::for_context(ctx.no_color);

            print_section_header(
                &format!(
                    "{} {}",
                    wad.display(),
                    format_count_badge(maps.len(), "map", &style)
                ),
                &style,
            );

            if maps.is_empty() {
                println!("No maps found");
                return Ok(());
            }

            let mut table = create_table(&style);
            table.set_header(vec![
                header_cell("Name", &style),
                header_cell("Label", &style),
                header_cell("End", &style),
                header_cell("Format", &style),
                header_cell("Nodes", &style),
                header_cell("GL Label", &style),
            ]);

            for map in maps {
                table.add_row(vec![
                    regular_cell(&map.name),
                    numeric_cell(&map.label.to_string()),
                    numeric_cell(&map.end.to_string()),
                    regular_cell(&map.format.to_string()),
                    regular_cell(&map.nodes_format.to_string()),
                    optional_cell(map.gl_label.map(|i| i.to_string()), &style),
                ]);
            }

            println!("{table}");
        }
    }

    Ok(())
}
