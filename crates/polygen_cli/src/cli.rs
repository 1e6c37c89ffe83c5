use std::io::IsTerminal;
use std::path::PathBuf;

use eyre::{Context, Result, bail};
use polygen::{CosetEnumeration, PolygenConfig, PolygenError};
use serde::Serialize;

use crate::report;
use crate::settings::{self, ConfigOverrides};

/// Uniform polytope generator
///
/// Diagrams use the plaintext notation, such as `x4o3o` for the cube.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print a parsed Coxeter diagram as JSON.
    Parse {
        /// Coxeter diagram (such as `x4o3o`)
        diagram: String,
    },
    /// Generate a polytope and print it as JSON.
    Generate {
        /// Coxeter diagram (such as `x4o3o`)
        diagram: String,

        /// YAML configuration file.
        #[arg(short, long, env = "POLYGEN_CONFIG")]
        config: Option<PathBuf>,
        /// Maximum number of live cosets processed by each coset enumeration.
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Accept diagrams with fractional edges, such as `x5/2o3o`.
        #[arg(long)]
        allow_fractional: bool,

        /// Print only element counts and face sizes.
        #[arg(short, long)]
        summary: bool,
    },
    /// Enumerate the cosets of a subgroup of a finitely presented group and
    /// print them as JSON.
    Cosets {
        /// Generator letters (such as `abc`).
        #[arg(short, long)]
        alphabet: String,
        /// Relator word (such as `abab`), which may be repeated.
        #[arg(short, long = "relation")]
        relations: Vec<String>,
        /// Subgroup generator word, which may be repeated.
        #[arg(short, long = "subgroup")]
        subgroup: Vec<String>,

        /// Treat uppercase letters as inverses instead of treating every
        /// generator as its own inverse.
        #[arg(long)]
        no_self_inverse: bool,
        /// Maximum number of live cosets processed.
        #[arg(long, default_value_t = PolygenConfig::DEFAULT.max_iterations)]
        max_iterations: usize,

        /// Include the full coset table.
        #[arg(short, long)]
        table: bool,
    },
}

#[derive(Serialize, Debug)]
struct CosetsOutput {
    coset_count: usize,
    representatives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<Vec<Vec<u32>>>,
}

pub(crate) fn exec(subcommand: Subcommand) -> Result<()> {
    match subcommand {
        Subcommand::Parse { diagram } => match polygen::parse(&diagram) {
            Ok(description) => write_json_output(&description),
            Err(e) => {
                eprintln!("{}", report::render_syntax_error(&diagram, &e, use_color()));
                bail!("error parsing diagram {diagram:?}")
            }
        },

        Subcommand::Generate {
            diagram,
            config: config_file,
            max_iterations,
            allow_fractional,
            summary,
        } => {
            let overrides = ConfigOverrides {
                max_iterations,
                allow_fractional,
            };
            let config = settings::load(config_file.as_deref(), overrides)?;
            log::debug!("using {config:?}");

            match polygen::polygen_with_config(&diagram, &config) {
                Ok(polytope) if summary => write_json_output(&polytope.summary()),
                Ok(polytope) => write_json_output(&polytope),
                Err(PolygenError::Syntax(e)) => {
                    eprintln!("{}", report::render_syntax_error(&diagram, &e, use_color()));
                    bail!("error parsing diagram {diagram:?}")
                }
                Err(e) => Err(e).wrap_err_with(|| format!("error generating {diagram:?}")),
            }
        }

        Subcommand::Cosets {
            alphabet,
            relations,
            subgroup,
            no_self_inverse,
            max_iterations,
            table,
        } => {
            let relations: Vec<&str> = relations.iter().map(String::as_str).collect();
            let subgroup: Vec<&str> = subgroup.iter().map(String::as_str).collect();
            let coset_table =
                CosetEnumeration::from_strings(&alphabet, &relations, &subgroup, !no_self_inverse)
                    .and_then(|enumeration| enumeration.solve(max_iterations))
                    .wrap_err("error enumerating cosets")?;

            write_json_output(&CosetsOutput {
                coset_count: coset_table.len(),
                representatives: coset_table.representative_strings(),
                table: table.then(|| {
                    coset_table
                        .rows()
                        .map(|row| row.iter().map(|coset| coset.0).collect())
                        .collect()
                }),
            })
        }
    }
}

fn use_color() -> bool {
    std::io::stderr().is_terminal()
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "polygen", "cosets", "-a", "abc", "-r", "aa", "-r", "abab", "-s", "a",
        ])
        .unwrap();
        let Subcommand::Cosets {
            alphabet,
            relations,
            subgroup,
            no_self_inverse,
            max_iterations,
            table,
        } = args.subcommand
        else {
            panic!("expected cosets subcommand");
        };
        assert_eq!(alphabet, "abc");
        assert_eq!(relations, ["aa", "abab"]);
        assert_eq!(subgroup, ["a"]);
        assert!(!no_self_inverse && !table);
        assert_eq!(max_iterations, 1_000_000);

        let args = Args::try_parse_from(["polygen", "generate", "x5/2o3o", "--allow-fractional"])
            .unwrap();
        assert!(matches!(
            args.subcommand,
            Subcommand::Generate {
                allow_fractional: true,
                summary: false,
                ..
            },
        ));
    }

    #[test]
    fn test_cosets_output() {
        let coset_table = CosetEnumeration::from_strings("ab", &["aa", "bb", "abab"], &["a"], true)
            .unwrap()
            .solve(1000)
            .unwrap();
        let output = CosetsOutput {
            coset_count: coset_table.len(),
            representatives: coset_table.representative_strings(),
            table: None,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["coset_count"], 2);
        assert_eq!(json["representatives"][0], "");
        assert!(json.get("table").is_none());
    }
}
