use crate::packages::Package;
use colored::Colorize;

const MAX_DESCRIPTION: usize = 50;
const HEADERS: [&str; 5] = ["ID", "Name", "Version", "Provider", "Description"];

/// Cut to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn border(widths: &[usize], left: &str, mid: &str, right: &str) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(mid), right)
}

/// Numbered result table, one row per package, in the given order.
pub fn render_results(results: &[Package]) -> String {
    if results.is_empty() {
        return "No packages found\n".to_string();
    }

    let rows: Vec<[String; 5]> = results
        .iter()
        .enumerate()
        .map(|(i, pkg)| {
            [
                (i + 1).to_string(),
                pkg.name.clone(),
                pkg.version.clone(),
                pkg.provider.clone(),
                truncate(&pkg.description, MAX_DESCRIPTION),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&border(&widths, "┌", "┬", "┐"));

    out.push('│');
    for (header, width) in HEADERS.iter().zip(&widths) {
        out.push_str(&format!(" {} │", pad(header, *width).yellow().bold()));
    }
    out.push('\n');
    out.push_str(&border(&widths, "├", "┼", "┤"));

    for row in &rows {
        out.push('│');
        for (col, (cell, width)) in row.iter().zip(&widths).enumerate() {
            let padded = pad(cell, *width);
            let styled = match col {
                1 => padded.magenta().bold(),
                2 => padded.cyan(),
                3 => padded.green().italic(),
                _ => padded.normal(),
            };
            out.push_str(&format!(" {} │", styled));
        }
        out.push('\n');
    }

    out.push_str(&border(&widths, "└", "┴", "┘"));
    out
}

/// Field listing shown before the install prompt.
pub fn render_details(pkg: &Package) -> String {
    let mut out = String::from("\nPackage Details:\n");
    let mut line = |key: &str, value: &str| {
        out.push_str(&format!("{}: {}\n", key.bold(), value));
    };

    line("Name", &pkg.name.magenta().bold().to_string());
    line("Provider", &pkg.provider.green().italic().to_string());
    line("Version", &pkg.version.cyan().to_string());
    line("Description", &pkg.description);
    if !pkg.author.is_empty() {
        line("Author", &pkg.author);
    }
    if let Some(downloads) = pkg.downloads {
        line("Downloads", &downloads.to_string());
    }
    if let Some(homepage) = &pkg.homepage {
        line("Homepage", homepage);
    }
    if let Some(repository) = &pkg.repository {
        line("Repository", repository);
    }
    out
}
