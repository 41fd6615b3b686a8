use crate::{
    cli::{
        actions::context::{AppContext, print_json},
        globals::OutputFormat,
    },
    features::textbooks::{
        client,
        types::{ALLOWED_EXTENSIONS, KnowledgeFilter, Textbook},
    },
    util::format_date,
};
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug)]
pub enum Command {
    List,
    Show {
        id: String,
    },
    Upload {
        file: PathBuf,
        name: Option<String>,
        version: Option<String>,
    },
    Parse {
        id: String,
        units: Option<Vec<u32>>,
    },
    Delete {
        id: String,
    },
    Knowledge {
        id: String,
        filter: KnowledgeFilter,
    },
}

/// Execute a textbook command.
/// # Errors
/// Returns an error if not logged in, the file is unusable, or the request fails.
pub async fn execute(ctx: &AppContext, command: Command) -> Result<()> {
    ctx.require_login()?;

    match command {
        Command::List => {
            let textbooks = client::list_textbooks(&ctx.api).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&textbooks),
                OutputFormat::Text => {
                    for textbook in &textbooks {
                        println!("{}", summary_line(textbook));
                    }
                    Ok(())
                }
            }
        }
        Command::Show { id } => {
            let textbook = client::get_textbook(&ctx.api, &id).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&textbook),
                OutputFormat::Text => {
                    println!("{}", summary_line(&textbook));
                    for unit in &textbook.units {
                        println!(
                            "  Unit {}: {} (vocabulary {}, grammar {}, sentences {})",
                            unit.unit_number,
                            unit.title,
                            unit.vocabulary_count,
                            unit.grammar_count,
                            unit.sentence_count
                        );
                    }
                    Ok(())
                }
            }
        }
        Command::Upload {
            file,
            name,
            version,
        } => {
            let file_name = upload_file_name(&file)?;
            let contents = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let name = name.unwrap_or_else(|| default_name(&file));

            info!(file = %file_name, bytes = contents.len(), "uploading textbook");
            let response = client::upload_textbook(
                &ctx.api,
                &file_name,
                contents,
                &name,
                version.as_deref(),
            )
            .await?;
            print_json(&response)
        }
        Command::Parse { id, units } => {
            let response = client::parse_textbook(&ctx.api, &id, units).await?;
            print_json(&response)
        }
        Command::Delete { id } => {
            let response = client::delete_textbook(&ctx.api, &id).await?;
            print_json(&response)
        }
        Command::Knowledge { id, filter } => {
            let points = client::knowledge_points(&ctx.api, &id, &filter).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&points),
                OutputFormat::Text => {
                    for point in &points {
                        let meaning = point.chinese_meaning.as_deref().unwrap_or("");
                        println!("[{}] {} {}", point.point_type, point.content, meaning);
                    }
                    Ok(())
                }
            }
        }
    }
}

fn summary_line(textbook: &Textbook) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        textbook.id,
        textbook.name,
        textbook.version.as_deref().unwrap_or("-"),
        textbook.parse_status.as_str(),
        format_date(textbook.created_at.as_deref())
    )
}

/// File name sent to the server; rejects extensions it would refuse.
fn upload_file_name(file: &Path) -> Result<String> {
    let Some(file_name) = file.file_name().and_then(|name| name.to_str()) else {
        bail!("Invalid file path: {}", file.display());
    };
    if !client::is_supported_file(file_name) {
        bail!(
            "Unsupported file type: {file_name} (expected one of: {})",
            ALLOWED_EXTENSIONS.join(", ")
        );
    }
    Ok(file_name.to_string())
}

/// Textbook name used when none is given: the file stem.
fn default_name(file: &Path) -> String {
    file.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("textbook")
        .to_string()
}
