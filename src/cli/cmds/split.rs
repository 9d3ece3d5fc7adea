use std::io::Write;
use std::path::PathBuf;

use crate::{Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

use sifstore::chunk::{self, SplitOptions};
use sifstore::Error;

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("split")
        .about("Split a SIF image into fixed-size numbered part files")
        .arg(
            Arg::with_name("input")
                .long("input")
                .value_name("PATH")
                .required(true)
                .help("The image file to split"),
        )
        .arg(
            Arg::with_name("prefix")
                .long("prefix")
                .value_name("NAME")
                .help("Logical name of the part set (default: input file name minus .sif)"),
        )
        .arg(
            Arg::with_name("out-dir")
                .long("out-dir")
                .value_name("DIR")
                .default_value(".")
                .help("Directory under which the <prefix> part directory is created"),
        )
        .arg(
            Arg::with_name("chunk-size")
                .long("chunk-size")
                .value_name("SIZE")
                .default_value("2G")
                .help("Bytes per part; k/m/g/t suffixes are powers of 1024"),
        )
        .arg(
            Arg::with_name("digits")
                .long("digits")
                .value_name("N")
                .default_value("5")
                .help("Zero-padded width of the part index"),
        )
        .arg(
            Arg::with_name("start")
                .long("start")
                .value_name("N")
                .default_value("1")
                .help("Index given to the first part"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let input = PathBuf::from(args.value_of("input").unwrap());

    let prefix = match args.value_of("prefix") {
        Some(prefix) => prefix.to_string(),
        None => chunk::default_prefix(&input).ok_or_else(|| {
            Error::InvalidConfiguration(format!(
                "cannot derive a prefix from {}; pass --prefix",
                input.display()
            ))
        })?,
    };

    let mut options = SplitOptions::new(&input, &prefix);
    options.out_dir = PathBuf::from(args.value_of("out-dir").unwrap());
    options.chunk_size = args.value_of("chunk-size").unwrap().parse()?;
    options.digits = parse_number(args.value_of("digits").unwrap(), "digit width")?;
    options.start_index = parse_number(args.value_of("start").unwrap(), "start index")?;

    let report = chunk::split(&options)?;

    writeln!(
        cli,
        "Wrote {} part(s) under {}",
        report.parts,
        report.part_dir.display()
    )?;

    Ok(())
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> std::result::Result<T, Error> {
    value.parse().map_err(|_| {
        Error::InvalidConfiguration(format!("`{}` is not a valid {}", value, what))
    })
}
