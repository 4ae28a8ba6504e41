use std::{error::Error, path::PathBuf, process::exit};

use clap::{builder::PossibleValuesParser, value_parser, Arg, ArgAction, Command};
use env_logger::Env;
use log::info;
use nbtview::{
    pipeline::{Initialized, Pipeline, PipelineOptions, Request},
    Decode, NbtDecoder, RenderOptions, VisualNode,
};
use nbtview_tools::{notify_stderr, read_file, Format, JsonDecoder};

type Result<T> = std::result::Result<T, Box<dyn Error>>;

fn cmd() -> Command {
    Command::new("nbt-view")
        .about("Show the contents of NBT files as a tree")
        .arg(
            Arg::new("path")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("little-endian")
                .short('L')
                .long("little-endian")
                .action(ArgAction::SetTrue)
                .help("Read Bedrock Edition (little endian) data"),
        )
        .arg(
            Arg::new("truncate")
                .short('t')
                .long("truncate")
                .value_parser(value_parser!(usize))
                .default_value("50")
                .help("Show at most this many elements of each list or array, 0 for all"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(PossibleValuesParser::new(Format::NAMES))
                .default_value("text"),
        )
        .arg(
            Arg::new("clear")
                .long("clear")
                .action(ArgAction::SetTrue)
                .help("Only keep the last file that rendered"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Files hold JSON tag trees rather than binary NBT"),
        )
}

/// Submit every path in order. Returns the document and how many
/// submissions failed.
async fn run<D: Decode>(
    decoder: Initialized<D>,
    paths: &[PathBuf],
    big_endian: bool,
    options: PipelineOptions,
) -> (Vec<VisualNode>, usize) {
    let pipeline = Pipeline::new(decoder, vec![], notify_stderr, options);

    let mut failed = 0;
    for path in paths {
        if pipeline
            .submit(Request::new(read_file(path), big_endian))
            .await
            .is_err()
        {
            failed += 1;
        }
    }

    (pipeline.into_document(), failed)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let matches = cmd().get_matches();

    let paths: Vec<PathBuf> = matches
        .get_many::<PathBuf>("path")
        .unwrap_or_default()
        .cloned()
        .collect();
    let big_endian = !matches.get_flag("little-endian");
    let truncate = match matches.get_one::<usize>("truncate") {
        Some(0) | None => None,
        Some(&n) => Some(n),
    };
    let format: Format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text")
        .parse()?;

    let options = PipelineOptions {
        render: RenderOptions { truncate },
        clear_previous: matches.get_flag("clear"),
    };

    let (document, failed) = if matches.get_flag("json") {
        run(Initialized::ready(JsonDecoder), &paths, big_endian, options).await
    } else {
        run(Initialized::ready(NbtDecoder), &paths, big_endian, options).await
    };

    info!("{} of {} files rendered", paths.len() - failed, paths.len());
    print!("{}", format.write(&document)?);

    if failed > 0 {
        exit(1);
    }
    Ok(())
}
