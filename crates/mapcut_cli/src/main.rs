use std::path::PathBuf;

use clap::Parser;

use mapcut_cli::{render_summary, run, RunInput};

#[derive(Parser)]
#[command(
    name = "mapcut",
    about = "Cut top de jure titles, and every dataset trace of them, out of a mod's map"
)]
struct Cli {
    /// Top de jure title to remove; if plural, the titles should not overlap.
    #[arg(value_name = "TITLE", required = true)]
    titles: Vec<String>,

    /// Vanilla installation root (base VFS layer).
    #[arg(long, value_name = "DIR")]
    vanilla_root: PathBuf,

    /// Mod root overlay; repeatable, later roots override earlier ones.
    #[arg(long = "mod-root", value_name = "DIR")]
    mod_roots: Vec<PathBuf>,

    /// Destination root for the edited datasets.
    #[arg(long, value_name = "DIR")]
    out_root: PathBuf,

    /// Landed-titles filename under common/landed_titles.
    #[arg(long, value_name = "FILE", default_value = "landed_titles.txt")]
    titles_file: String,

    /// Holy-sites script re-emitted with every deleted title filtered out.
    #[arg(long, value_name = "FILE")]
    holy_sites_file: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let input = RunInput {
        top_titles: cli.titles,
        vanilla_root: cli.vanilla_root,
        mod_roots: cli.mod_roots,
        out_root: cli.out_root,
        titles_file: cli.titles_file,
        holy_sites_file: cli.holy_sites_file,
    };

    match run(&input) {
        Ok(report) => print!("{}", render_summary(&report)),
        Err(err) => {
            eprintln!("fatal: {}", err);
            std::process::exit(1);
        }
    }
}
