use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use mdtextwrap::{
    MarkdownTextWrap, MonospaceMeasurer, TextMeasurer, WrapOptions,
    io::{wrap_file, wrap_stdin},
    markup::{Element, Markup, px},
};
use rayon::prelude::*;

#[derive(Parser)]
#[command(version, about = "Lay out Markdown labels into wrapped lines")]
struct Cli {
    #[command(flatten)]
    opts: LayoutOpts,
    /// Markdown files to lay out; reads stdin when none are given
    files: Vec<PathBuf>,
}

#[derive(clap::Args, Clone)]
struct LayoutOpts {
    /// Maximum line width in pixels; unbounded when omitted
    #[arg(long)]
    width: Option<f64>,
    /// Font size in pixels
    #[arg(long = "font-size", default_value_t = mdtextwrap::text_wrap::DEFAULT_FONT_SIZE)]
    font_size: f64,
    /// Line height as a multiple of the font size
    #[arg(long = "line-height", default_value_t = mdtextwrap::text_wrap::DEFAULT_LINE_HEIGHT)]
    line_height: f64,
    /// Output projection
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Detail term id to number in SVG output; repeat in reference order
    #[arg(long = "reference")]
    references: Vec<String>,
    /// Advance of one character cell in ems
    #[arg(long, default_value_t = 0.6)]
    advance: f64,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    /// Plain text, one output line per laid-out line
    Text,
    /// Measured width and text of each line, tab separated
    Lines,
    Html,
    Svg,
}

impl LayoutOpts {
    fn wrap_options(&self) -> WrapOptions {
        let mut options = WrapOptions::default()
            .with_font_size(self.font_size)
            .with_line_height(self.line_height)
            .with_max_width(self.width.unwrap_or(f64::INFINITY));
        if !self.references.is_empty() {
            options = options.with_detail_references(self.references.clone());
        }
        options
    }

    fn measurer(&self) -> Arc<dyn TextMeasurer> {
        Arc::new(MonospaceMeasurer::with_advance(self.advance))
    }
}

fn render(wrap: &MarkdownTextWrap, format: Format) -> String {
    match format {
        Format::Text => wrap.plaintext(),
        Format::Lines => wrap
            .lines()
            .iter()
            .map(|line| format!("{}\t{}", px(line.width()), line.plaintext()))
            .collect::<Vec<_>>()
            .join("\n"),
        Format::Html => wrap.render_html().to_string(),
        Format::Svg => {
            let svg: Markup = Element::new("svg")
                .attr("xmlns", "http://www.w3.org/2000/svg")
                .attr("width", px(wrap.svg_width()))
                .attr("height", px(wrap.svg_height()))
                .child(wrap.render_svg(0.0, 0.0, &[]))
                .into();
            svg.to_string()
        }
    }
}

/// Entry point for the command-line previewer.
///
/// Lays out each file (or stdin) with the monospace measurer and prints the
/// requested projection. Files are processed in parallel and printed in the
/// order given.
///
/// # Examples
///
/// ```sh
/// # Wrap a label to 200px at 12px type
/// mdtextwrap --width 200 --font-size 12 label.md
///
/// # Render SVG with numbered detail terms
/// echo 'Share of [GDP](#dod:gdp)' | mdtextwrap --format svg --reference gdp
/// ```
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let options = cli.opts.wrap_options();
    let measurer = cli.opts.measurer();

    if cli.files.is_empty() {
        let wrap = wrap_stdin(options, measurer).context("failed to lay out stdin")?;
        println!("{}", render(&wrap, cli.opts.format));
        return Ok(());
    }

    let outputs = cli
        .files
        .par_iter()
        .map(|path| {
            wrap_file(path, options.clone(), Arc::clone(&measurer))
                .map(|wrap| render(&wrap, cli.opts.format))
                .with_context(|| format!("failed to lay out {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    for output in outputs {
        println!("{output}");
    }
    Ok(())
}
