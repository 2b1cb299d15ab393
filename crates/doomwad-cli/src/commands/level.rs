use crate::{
    CommandContext, OutputFormat,
    output::{OutputStyle, format_key_value, format_warning, print_section_header},
};
use anyhow::Context;
use doomwad_formats::LevelBuilder;
use std::path::Path;

pub fn handle(
    wad: &Path,
    map_name: &str,
    use_gl_nodes: bool,
    ctx: &CommandContext,
) -> anyhow::Result<()> {
    let archive = ctx.open_archive(wad)?;
    let map = archive
        .map(map_name)
        .with_context(|| format!("Map {map_name} not found in {}", wad.display()))?;

    let level = LevelBuilder::new(&archive, map)
        .use_gl_nodes(use_gl_nodes)
        .build()
        .with_context(|| format!("Failed to build {}", map.name))?;
    let summary = level.summary();

    match ctx.format {
        OutputFormat::Json | OutputFormat::JsonPretty => ctx.print_json(&summary)?,
        OutputFormat::Text => {
            let style = OutputStyle::for_context(ctx.no_color);

            print_section_header(&format!("Level {}", summary.name), &style);

            let first_extended = summary
                .first_extended_vertex
                .map_or_else(|| "-".to_string(), |i| i.to_string());
            let rows = [
                ("Format", summary.format.to_string()),
                ("Nodes", summary.nodes_format.to_string()),
                ("Sectors", summary.sectors.to_string()),
                ("Sidedefs", summary.sidedefs.to_string()),
                ("Linedefs", summary.linedefs.to_string()),
                ("  one-sided", summary.one_sided_linedefs.to_string()),
                ("  two-sided", summary.two_sided_linedefs.to_string()),
                ("Vertices", summary.vertices.to_string()),
                ("First GL vertex", first_extended),
                ("Segments", summary.segments.to_string()),
                ("  minisegs", summary.minisegs.to_string()),
                ("Subsectors", summary.subsectors.to_string()),
                ("BSP nodes", summary.nodes.to_string()),
            ];
            for (key, value) in rows {
                println!("{}", format_key_value(key, &value, &style));
            }

            if summary.subsectors_without_sector > 0 {
                println!(
                    "{}",
                    format_warning(
                        &format!(
                            "{} subsectors have no resolvable sector",
                            summary.subsectors_without_sector
                        ),
                        &style
                    )
                );
            }
        }
    }

    Ok(())
}
