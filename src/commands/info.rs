use crate::table::Table;

use super::*;

pub const USAGE: &str = "info [--json]";
pub const SHORT: &str = "show app info";
pub const LONG: &str = "
Info shows the app's owner, stack, URLs, dyno counts and sizes.

Options:

    --json  print the app record as JSON
";

/// Show details for an app
#[derive(Parser)]
pub struct Args {
    /// Output in JSON format
    #[clap(long)]
    json: bool,
}

pub async fn command(ctx: &Context, args: Vec<String>) -> Result<Outcome> {
    let args: Args = parse_args(USAGE, &args)?;
    let app = ctx.app()?;

    let app: App = ctx.client()?.get(&format!("/apps/{app}")).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&app)?);
        return Ok(Outcome::Completed);
    }

    Table::new(app.name.clone(), rows(&app)).print();
    Ok(Outcome::Completed)
}

fn rows(app: &App) -> Vec<(String, String)> {
    let optional = [
        ("Owner", app.owner_email.clone()),
        ("Stack", app.stack.clone()),
        ("Git URL", app.git_url.clone()),
        ("Web URL", app.web_url.clone()),
        ("Repo size", app.repo_size.map(format_size)),
        ("Slug size", app.slug_size.map(format_size)),
        (
            "Created",
            app.created_at.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string()),
        ),
    ];

    let mut rows = vec![("Name".to_owned(), app.name.clone())];
    rows.extend(
        optional
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key.to_owned(), v))),
    );
    rows.push(("Dynos".to_owned(), app.dynos.to_string()));
    rows.push(("Workers".to_owned(), app.workers.to_string()));
    rows
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }

    #[test]
    fn test_rows_skip_missing_fields() {
        let app: App = serde_json::from_value(serde_json::json!({
            "name": "example",
            "stack": "cedar",
            "dynos": 3
        }))
        .unwrap();
        let keys: Vec<_> = rows(&app).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["Name", "Stack", "Dynos", "Workers"]);
    }
}
