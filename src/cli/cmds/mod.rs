use crate::{Cli, Result};

mod install_lfs;
mod join;
mod split;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(install_lfs::subcommand())
        .subcommand(join::subcommand())
        .subcommand(split::subcommand())
}

pub(crate) fn dispatch(cli: &mut Cli) -> Result<()> {
    let matches = cli.arg_matches.clone();
    // ^^ Ugh. Need an independent copy of matches so we can still pass
    // the Cli struct through to subcommand imps.

    match matches.subcommand() {
        ("install-lfs", Some(m)) => install_lfs::run(cli, &m),
        ("join", Some(m)) => join::run(cli, &m),
        ("split", Some(m)) => split::run(cli, &m),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}
