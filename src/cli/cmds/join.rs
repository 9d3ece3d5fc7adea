use std::io::Write;
use std::path::PathBuf;

use crate::{Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

use sifstore::chunk::{self, JoinOptions};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("join")
        .about("Rebuild a SIF image from its numbered part files")
        .arg(
            Arg::with_name("prefix")
                .long("prefix")
                .value_name("NAME")
                .required(true)
                .help("Logical name of the part set"),
        )
        .arg(
            Arg::with_name("in-dir")
                .long("in-dir")
                .value_name("DIR")
                .default_value(".")
                .help("Directory holding the <prefix> part directory (or the parts themselves)"),
        )
        .arg(
            Arg::with_name("output")
                .long("output")
                .value_name("PATH")
                .help("Where to write the rebuilt image (default: <prefix>.sif)"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result<()> {
    let prefix = args.value_of("prefix").unwrap();

    let mut options = JoinOptions::new(prefix);
    options.in_dir = PathBuf::from(args.value_of("in-dir").unwrap());
    if let Some(output) = args.value_of("output") {
        options.output = PathBuf::from(output);
    }

    let report = chunk::join(&options)?;

    writeln!(
        cli,
        "Wrote {} ({} bytes from {} part(s))",
        report.output.display(),
        report.bytes,
        report.parts
    )?;

    Ok(())
}
