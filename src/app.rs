use clap::{Parser, Subcommand};
use log::debug;
use std::{
    io::{BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use crate::{
    error::AppError,
    finder::RouteFinder,
    render::{OutputFormat, Renderer},
    route_table::RouteTable,
};

/// look up Jeep Code routes and highlight the stops they share
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct JeepCodeApp {
    #[command(subcommand)]
    pub op: JeepCodeOperation,
    /// route table CSV with columns route_code,stop_sequence,stop_name.
    /// defaults to the table compiled into the binary
    #[arg(long, global = true)]
    pub routes: Option<PathBuf>,
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Ansi)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Subcommand)]
pub enum JeepCodeOperation {
    /// resolve a comma separated list of Jeep Codes, e.g. 01A,03C
    Find { codes: String },
    /// read one list of Jeep Codes per line from stdin until EOF
    Interactive,
    /// list every route in the route table
    List,
}

impl JeepCodeApp {
    pub fn load_table(&self) -> Result<RouteTable, AppError> {
        let table = match &self.routes {
            Some(path) => RouteTable::from_path(path)?,
            None => RouteTable::embedded()?,
        };
        Ok(table)
    }

    pub fn run<R: BufRead, W: Write>(&self, input: R, out: &mut W) -> Result<(), AppError> {
        let table = Arc::new(self.load_table()?);
        let renderer = Renderer::new(self.format);

        match &self.op {
            JeepCodeOperation::Find { codes } => {
                let mut finder = RouteFinder::new(table);
                finder.set_input(codes.as_str());
                let result = finder.submit().map(|_| ());
                writeln!(out, "{}", renderer.render_session(&finder))?;
                result?;
            }
            JeepCodeOperation::Interactive => {
                eprintln!("Enter Jeep Code(s) e.g., 01A,03C");
                let mut finder = RouteFinder::new(table);
                for line in input.split(b'\n') {
                    finder.set_input(query_from_line(&line?));
                    if let Err(err) = finder.submit() {
                        debug!("Rejected {:?}: {}", finder.input(), err);
                    }
                    writeln!(out, "{}", renderer.render_session(&finder))?;
                }
            }
            JeepCodeOperation::List => {
                for code in table.codes() {
                    let stops = table.get(code).map_or(0, <[_]>::len);
                    writeln!(out, "{}: {} stops", code, stops)?;
                }
            }
        }

        Ok(())
    }
}

/// Undecodable bytes become U+FFFD so the line fails validation instead of
/// ending the session.
fn query_from_line(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::FinderError;

    fn run(args: &[&str], stdin: &str) -> (Result<(), AppError>, String) {
        let app = JeepCodeApp::parse_from(std::iter::once("jeepcode").chain(args.iter().copied()));
        let mut out = Vec::new();
        let result = app.run(stdin.as_bytes(), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_find() {
        let (result, out) = run(&["find", "01A", "--format", "plain"], "");

        assert!(result.is_ok());
        assert_eq!(out, "01A => Alpha <-> Bravo <-> Charlie <-> Echo <-> Golf\n");
    }

    #[test]
    fn test_find_invalid_prints_message_and_fails() {
        let (result, out) = run(&["--format", "plain", "find", "01A,"], "");

        assert!(matches!(
            result,
            Err(AppError::Finder(FinderError::InvalidFormat { .. }))
        ));
        assert_eq!(out, "Invalid format. Please enter valid Jeep Code(s).\n");
    }

    #[test]
    fn test_interactive_treats_each_line_as_a_submission() {
        let (result, out) = run(
            &["interactive", "--format", "plain"],
            "01A,02B\r\n01A, 02B\n99Z\n",
        );

        assert!(result.is_ok());
        assert_eq!(
            out,
            "01A => Alpha <-> Bravo <-> Charlie <-> Echo <-> Golf\n\
             02B => Alpha <-> Delta <-> Echo <-> Foxtrot <-> Golf\n\
             Invalid format. Please enter valid Jeep Code(s).\n\
             99Z => \n"
        );
    }

    #[test]
    fn test_interactive_survives_undecodable_line() {
        let app = JeepCodeApp::parse_from(["jeepcode", "interactive", "--format", "plain"]);
        let mut out = Vec::new();
        let result = app.run(&b"01A\n\xff\xfe\r\n02B\n"[..], &mut out);

        assert!(result.is_ok());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "01A => Alpha <-> Bravo <-> Charlie <-> Echo <-> Golf\n\
             Invalid format. Please enter valid Jeep Code(s).\n\
             02B => Alpha <-> Delta <-> Echo <-> Foxtrot <-> Golf\n"
        );
    }

    #[test]
    fn test_list() {
        let (result, out) = run(&["list"], "");

        assert!(result.is_ok());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "01A: 5 stops");
        assert_eq!(lines[12], "20C: 6 stops");
    }

    #[test]
    fn test_missing_route_file() {
        let (result, out) = run(&["find", "01A", "--routes", "does/not/exist.csv"], "");

        assert!(matches!(result, Err(AppError::Table(_))));
        assert!(out.is_empty());
    }
}
