//! Canopy CLI - query and interact with rendered tree fixtures
//!
//! A fixture is the JSON snapshot of a rendered tree, the same shape
//! `to_json` produces. Handler props are written as `{"$handler": "label"}`;
//! the CLI replaces them with handlers that print their arguments.

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use canopy_common::warning::set_warnings_enabled;
use canopy_query::{QueryConfig, QueryResult, Rendered};
use canopy_tree::{Handler, NodeAdapter, NodeId, PropValue, RenderTree};
use clap::Parser;
use owo_colors::OwoColorize;

/// Canopy - query rendered component trees with CSS-like selectors
#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the whole tree
    canopy welcome.json

    # First match of a selector
    canopy welcome.json -q 'View > Text'

    # Text of every match
    canopy welcome.json -q 'Text' --all --text

    # Fire an event on a matched node
    canopy form.json -q 'TextInput#email' -s changeText --arg '"me@example.com"'

    # Read the fixture from stdin
    cat welcome.json | canopy - --json
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to the fixture JSON, or `-` for stdin
    #[arg(value_name = "FILE")]
    fixture: String,

    /// Selector to evaluate from the root
    #[arg(short, long, value_name = "SELECTOR")]
    query: Option<String>,

    /// Act on every match instead of the first
    #[arg(short, long, requires = "query")]
    all: bool,

    /// Print the concatenated text of each target
    #[arg(short, long)]
    text: bool,

    /// Print each target as snapshot JSON
    #[arg(short, long, conflicts_with = "text")]
    json: bool,

    /// Simulate an event on each target
    #[arg(short, long, value_name = "EVENT", conflicts_with_all = ["text", "json"])]
    simulate: Option<String>,

    /// Handler argument; parsed as JSON, or taken as a plain string
    #[arg(long = "arg", value_name = "VALUE", requires = "simulate")]
    args: Vec<String>,

    /// Attribute compared by `#id` selectors
    #[arg(long, value_name = "NAME", default_value = "testID")]
    id_attribute: String,

    /// Prefix of handler attribute names
    #[arg(long, value_name = "PREFIX", default_value = "on")]
    handler_prefix: String,

    /// Suppress warnings
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.quiet {
        set_warnings_enabled(false);
    }

    let tree = load_fixture(&cli.fixture)?;
    let config = QueryConfig::default()
        .with_id_attribute(cli.id_attribute.as_str())
        .with_handler_prefix(cli.handler_prefix.as_str());
    let view = Rendered::with_config(tree, config);

    let targets = select_targets(&view, &cli)?;
    let args: Vec<PropValue> = cli.args.iter().map(|raw| parse_arg(raw)).collect();

    for target in &targets {
        if let Some(ref event) = cli.simulate {
            let returned = target
                .simulate(event, &args)
                .with_context(|| format!("simulating `{event}`"))?;
            println!("{} {}", "=>".green(), display_value(&returned));
        } else if cli.json {
            let json = serde_json::to_string_pretty(&target.to_json())?;
            println!("{json}");
        } else if cli.text {
            println!("{}", target.text());
        } else {
            print_tree(view.tree(), target.node(), 0);
        }
    }

    Ok(())
}

/// Read and materialise the fixture, wiring `$handler` placeholders to
/// printing handlers.
fn load_fixture(path: &str) -> Result<RenderTree> {
    let json = if path == "-" {
        let mut buf = String::new();
        let _ = io::stdin()
            .read_to_string(&mut buf)
            .context("reading fixture from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading '{path}'"))?
    };

    RenderTree::from_json(&json, |label| {
        let label = label.to_string();
        Handler::named(label.clone(), move |args| {
            let shown: Vec<String> = args.iter().map(display_value).collect();
            println!("{} {label}({})", "called".cyan(), shown.join(", "));
            Ok(PropValue::Null)
        })
    })
    .with_context(|| format!("loading fixture '{path}'"))
}

fn select_targets<'r>(
    view: &'r Rendered<RenderTree>,
    cli: &Cli,
) -> Result<Vec<QueryResult<'r, RenderTree>>> {
    let Some(ref selector) = cli.query else {
        return Ok(vec![view.root()]);
    };

    if cli.all {
        let found = view.query_all(selector)?;
        if found.is_empty() {
            eprintln!("{} no node matches `{selector}`", "note:".yellow());
        }
        Ok(found)
    } else {
        match view.query(selector)? {
            Some(found) => Ok(vec![found]),
            None => bail!("no node matches `{selector}`"),
        }
    }
}

/// Interpret a command-line argument as a prop value.
fn parse_arg(raw: &str) -> PropValue {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::String(s)) => PropValue::String(s),
        Ok(serde_json::Value::Number(n)) => n.as_f64().map_or(PropValue::Null, PropValue::Number),
        Ok(serde_json::Value::Bool(b)) => PropValue::Bool(b),
        Ok(serde_json::Value::Null) => PropValue::Null,
        Ok(other) => PropValue::String(other.to_string()),
        Err(_) => PropValue::from(raw),
    }
}

fn display_value(value: &PropValue) -> String {
    match value {
        PropValue::String(s) => format!("{s:?}"),
        PropValue::Handler(h) => format!("[handler {}]", h.label().unwrap_or("anonymous")),
        other => other.coerce_to_string().unwrap_or_default().into_owned(),
    }
}

/// Print a subtree, one node per line, indented by depth.
fn print_tree(tree: &RenderTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(text) = tree.text(id) {
        let display = text.replace('\n', "\\n");
        println!("{prefix}\"{display}\"");
        return;
    }

    let type_name = tree.type_name(id).unwrap_or_default();
    match tree.attributes(id) {
        Some(attrs) if !attrs.is_empty() => {
            let mut names: Vec<&String> = attrs.keys().collect();
            names.sort();
            let attrs: Vec<String> = names
                .into_iter()
                .map(|name| format!("{name}={}", display_value(&attrs[name])))
                .collect();
            println!("{prefix}<{} {}>", type_name.bold(), attrs.join(" ").dimmed());
        }
        _ => println!("{prefix}<{}>", type_name.bold()),
    }

    for &child in tree.children(id) {
        print_tree(tree, child, indent + 1);
    }
}
