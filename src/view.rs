//! Terminal rendering of the list, detail and not-found views, plus the
//! interactive browser.

use colored::*;
use std::io::{self, Write};
use std::time::Instant;
use terminal_size::{Width, terminal_size};

use crate::deeplink;
use crate::natives::{ALL, Native};
use crate::signature::{Language, format_signature};
use crate::state::{AppState, Selection};
use crate::syntax::highlight_code;

/// Rendering options shared by all views.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub language: Language,
    pub theme: String,
    pub list_limit: usize,
}

fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        w as usize
    } else {
        80
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Print one row per entry: name, namespace, key and API set.
pub fn print_list(natives: &[&Native], limit: usize) {
    if natives.is_empty() {
        println!("  {} No natives found", "ℹ️".blue());
        return;
    }

    let width = get_terminal_width();
    let name_width = width.saturating_sub(48).clamp(16, 48);

    for native in natives.iter().take(limit) {
        let name = truncate(&native.display_name, name_width);
        println!(
            "  {} {:<name_width$} {:<14} {:<20} {}",
            "•".cyan(),
            name.green(),
            truncate(&native.namespace, 14).yellow(),
            native.key.dimmed(),
            native.api_set.blue(),
        );
    }

    if natives.len() > limit {
        println!("\n  ... and {} more", natives.len() - limit);
    }
    println!(
        "\n{} Total: {} native(s)",
        "✓".green(),
        natives.len().to_string().bold()
    );
}

pub fn print_namespaces(namespaces: &[String]) {
    for ns in namespaces {
        println!("  {} {}", "•".cyan(), ns.yellow());
    }
}

/// Detail pane for a single native.
pub fn print_detail(native: &Native, options: &ViewOptions, permalink: Option<&str>) {
    println!();
    println!("{}", "╔═══════════════════════════════════════════╗".cyan());
    println!(
        "║ {} {}.{}",
        "📦".cyan(),
        native.namespace.yellow(),
        native.display_name.green().bold()
    );
    println!("{}", "╚═══════════════════════════════════════════╝".cyan());
    println!();

    println!("{} {}", "Name:".bold(), native.raw_name);
    println!("{} {}", "Hash:".bold(), native.key);
    println!("{} {}", "API set:".bold(), native.api_set);
    if let Some(link) = permalink {
        println!("{} {}", "Link:".bold(), link.underline());
    }
    println!();

    let signature = format_signature(native, options.language);
    println!(
        "{}",
        highlight_code(&signature, options.language.extension(), &options.theme)
    );
    println!();

    if !native.params.is_empty() {
        println!("{}", "Parameters:".bold());
        for param in &native.params {
            println!(
                "  {} {} {}",
                "▸".cyan(),
                param.name.yellow(),
                format!("({})", param.kind).dimmed()
            );
            for line in param.description.lines().filter(|l| !l.trim().is_empty()) {
                println!("     {}", line.trim().dimmed());
            }
        }
        println!();
    }

    if !native.results_description.is_empty() {
        println!("{} {}", "Returns:".bold(), native.results_description);
        println!();
    }

    if !native.description.is_empty() {
        for line in native.description.lines() {
            println!("{}", line);
        }
        println!();
    }

    for (lang, code) in &native.examples {
        println!("{} {}", "Example".bold(), format!("({})", lang).dimmed());
        let extension = lang.parse::<Language>().map(Language::extension).unwrap_or(lang.as_str());
        println!("{}", highlight_code(code, extension, &options.theme));
        println!();
    }
}

pub fn print_not_found(key: &str) {
    println!();
    println!("{} Native {} was not found", "❌".red(), key.yellow().bold());
    println!("   The link may point at a native that no longer exists.");
    println!();
}

/// Render whatever the state selects.
pub fn print_selection(state: &AppState, options: &ViewOptions) {
    match state.selection() {
        Selection::Found(native) => {
            print_detail(native, options, state.permalink().map(|url| url.as_str()))
        }
        Selection::NotFound(key) => print_not_found(&key),
        Selection::None => println!("{} Nothing selected", "ℹ️".blue()),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  {} <text>            - Filter by free text", "(any)".green());
    println!("  {} <set|all>        - Filter by API set", ":apiset".green());
    println!("  {} <namespace|all>      - Filter by namespace", ":ns".green());
    println!("  {}                - List namespaces", ":namespaces".green());
    println!("  {} <key>              - Show a native", ":show".green());
    println!("  {} <address>          - Open a permalink", ":open".green());
    println!("  {} <c|lua|js|cs>      - Signature language", ":lang".green());
    println!("  {}                    - Print the current permalink", ":link".green());
    println!("  {}                    - Exit", ":quit".green());
}

/// Interactive browser over the loaded collection.
pub fn interactive(state: &mut AppState, options: &mut ViewOptions) -> Result<(), String> {
    println!("{}", "╔═══════════════════════════════════════════╗".cyan());
    println!("{}", "║   Native Reference Browser                ║".cyan());
    println!("{}", "╚═══════════════════════════════════════════╝".cyan());
    println!();
    println!(
        "{} natives in {} namespaces",
        state.index().len().to_string().bold(),
        state.index().namespaces().len().to_string().bold()
    );
    print_help();
    println!();

    if !matches!(state.selection(), Selection::None) {
        print_selection(state, options);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", "natref>".blue().bold());
        stdout.flush().map_err(|e| e.to_string())?;

        let mut input = String::new();
        let read = stdin.read_line(&mut input).map_err(|e| e.to_string())?;
        if read == 0 {
            break;
        }
        let input = input.trim();

        let (command, arg) = match input.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (input, ""),
        };

        match command {
            ":quit" | ":q" | ":exit" => {
                println!("Goodbye! 👋");
                break;
            }
            ":help" | ":?" => print_help(),
            ":apiset" => {
                state.set_api_set(if arg.is_empty() { ALL } else { arg });
                print_list(&state.visible(), options.list_limit);
            }
            ":ns" => {
                state.set_namespace(if arg.is_empty() { ALL } else { arg });
                print_list(&state.visible(), options.list_limit);
            }
            ":namespaces" => print_namespaces(state.index().namespaces()),
            ":show" => {
                if arg.is_empty() {
                    println!("{} Usage: :show <key>", "⚠️".yellow());
                    continue;
                }
                state.select(arg);
                print_selection(state, options);
            }
            ":open" => match deeplink::decode_str(arg) {
                Ok(Some(key)) => {
                    state.select(&key);
                    print_selection(state, options);
                }
                Ok(None) => println!("{} Address selects nothing", "ℹ️".blue()),
                Err(e) => println!("{} {}", "❌".red(), e),
            },
            ":lang" => match arg.parse::<Language>() {
                Ok(language) => {
                    options.language = language;
                    println!("{} Signatures in {}", "✓".green(), language);
                }
                Err(e) => println!("{} {}", "⚠️".yellow(), e),
            },
            ":link" => match state.permalink() {
                Some(url) => println!("{}", url.as_str().underline()),
                None => println!("{} The current native has no permalink", "ℹ️".blue()),
            },
            _ => {
                // Each line is a complete edit of the filter text
                state.set_query(input, Instant::now());
                state.flush();
                print_list(&state.visible(), options.list_limit);
            }
        }
        println!();
    }

    Ok(())
}
