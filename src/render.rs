use clap::ValueEnum;
use itertools::Itertools;

use crate::{data::*, error::FinderError, finder::RouteFinder};

const STOP_SEPARATOR: &str = " <-> ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// terminal colors for shared stops
    #[default]
    Ansi,
    /// no styling
    Plain,
    /// markup with inline color styles
    Html,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pub format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// The last submission of `finder`: its error message, or one line per route.
    pub fn render_session(&self, finder: &RouteFinder) -> String {
        match finder.error() {
            Some(err) => self.render_error(err),
            None => self.render_routes(finder.routes(), &finder.shared_stops()),
        }
    }

    pub fn render_routes(&self, routes: &[ResolvedRoute], shared: &SharedStops) -> String {
        routes
            .iter()
            .enumerate()
            .map(|(route_index, route)| self.render_route(route, route_index, shared))
            .join("\n")
    }

    pub fn render_route(
        &self,
        route: &ResolvedRoute,
        route_index: usize,
        shared: &SharedStops,
    ) -> String {
        let stops = route
            .stops
            .iter()
            .map(|stop| self.render_stop(stop, shared.highlight(stop, route_index)))
            .join(self.separator());

        match self.format {
            OutputFormat::Html => format!(
                "<div class=\"route\"><strong>{}</strong> =&gt; {}</div>",
                escape_html(route.code.as_str()),
                stops
            ),
            OutputFormat::Ansi | OutputFormat::Plain => format!("{} => {}", route.code, stops),
        }
    }

    pub fn render_stop(&self, stop: &Stop, highlight: Highlight) -> String {
        match (self.format, highlight) {
            (OutputFormat::Plain, _) | (OutputFormat::Ansi, Highlight::Default) => {
                stop.name.to_owned()
            }
            (OutputFormat::Ansi, _) => {
                format!("{}{}{}", ansi_code(highlight), stop.name, ANSI_RESET)
            }
            (OutputFormat::Html, _) => match highlight.color() {
                Some(color) => format!(
                    "<span style=\"color: {}\">{}</span>",
                    color,
                    escape_html(&stop.name)
                ),
                None => format!("<span>{}</span>", escape_html(&stop.name)),
            },
        }
    }

    pub fn render_error(&self, err: &FinderError) -> String {
        match self.format {
            OutputFormat::Plain => err.to_string(),
            OutputFormat::Ansi => format!("{}{}{}", ANSI_RED, err, ANSI_RESET),
            OutputFormat::Html => format!(
                "<p style=\"color: red\">{}</p>",
                escape_html(&err.to_string())
            ),
        }
    }

    fn separator(&self) -> &'static str {
        match self.format {
            OutputFormat::Html => " &lt;-&gt; ",
            OutputFormat::Ansi | OutputFormat::Plain => STOP_SEPARATOR,
        }
    }
}

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_RED: &str = "\x1b[31m";

fn ansi_code(highlight: Highlight) -> &'static str {
    match highlight {
        Highlight::Default => ANSI_RESET,
        Highlight::Primary => "\x1b[33m",
        Highlight::Secondary => "\x1b[32m",
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
