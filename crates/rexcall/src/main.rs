// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `rexcall` probe: drives the adapter from the command line.

use clap::Parser;

use rexcall::cli::{Cli, Command, ConfigArgs, InfoArgs, MatchArgs, PatternArgs};
use rexcall::flags::CONFIG_SELECTORS;
use rexcall::{CompileRequest, Config, Context, Error, Handle, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    logging::init(&config.log);

    let mut ctx = Context::from_config(&config);
    match &cli.command {
        Command::Match(args) => run_match(&mut ctx, args),
        Command::Info(args) => run_info(&mut ctx, args),
        Command::Names(args) => run_names(&mut ctx, args),
        Command::Config(args) => run_config(&ctx, args),
        Command::Version => {
            println!("{}", ctx.version());
            Ok(())
        }
    }
}

fn failed(err: Error) -> anyhow::Error {
    anyhow::anyhow!("{} (status {})", err, err.code())
}

fn compile(ctx: &mut Context, args: &PatternArgs) -> anyhow::Result<Handle> {
    let request = CompileRequest::new(args.pattern.as_bytes())
        .options(&args.options)
        .locale(&args.locale)
        .limits(args.match_limit, args.recursion_limit);
    ctx.compile(&request).map_err(failed)
}

fn run_match(ctx: &mut Context, args: &MatchArgs) -> anyhow::Result<()> {
    let handle = compile(ctx, &args.pattern)?;
    let subject = args.subject.as_bytes();
    let length = match args.length {
        Some(length) => length,
        None => i32::try_from(subject.len())?,
    };
    let count = ctx
        .exec(handle, subject, length, args.start, &args.exec_options)
        .map_err(failed)?;
    println!("{count}");

    let ovector = ctx.last_match(handle).map_err(failed)?;
    let groups = usize::try_from(count).unwrap_or(0);
    for (i, pair) in ovector.chunks_exact(2).take(groups).enumerate() {
        let (start, end) = (pair[0], pair[1]);
        let text = match (usize::try_from(start), usize::try_from(end)) {
            (Ok(s), Ok(e)) => String::from_utf8_lossy(subject.get(s..e).unwrap_or_default()),
            _ => "".into(),
        };
        println!("{i}\t{start}\t{end}\t{text}");
    }
    ctx.free(handle).map_err(failed)
}

fn run_info(ctx: &mut Context, args: &InfoArgs) -> anyhow::Result<()> {
    let handle = compile(ctx, &args.pattern)?;
    for selector in &args.selectors {
        let reply = ctx.fullinfo(handle, selector).map_err(failed)?;
        println!("{}={}", selector.to_ascii_uppercase(), reply);
    }
    ctx.free(handle).map_err(failed)
}

fn run_names(ctx: &mut Context, args: &PatternArgs) -> anyhow::Result<()> {
    let handle = compile(ctx, args)?;
    let count = ctx.object(handle).map_err(failed)?.names().len();
    for index in 1..=count {
        let (group, name) = ctx
            .name_entry(handle, i32::try_from(index)?)
            .map_err(failed)?;
        println!("{index}\t{group}\t{}", String::from_utf8_lossy(name));
    }
    ctx.free(handle).map_err(failed)
}

fn run_config(ctx: &Context, args: &ConfigArgs) -> anyhow::Result<()> {
    let selectors: Vec<String> = if args.selectors.is_empty() {
        CONFIG_SELECTORS.names().map(String::from).collect()
    } else {
        args.selectors.clone()
    };
    for selector in &selectors {
        let reply = ctx.config(selector).map_err(failed)?;
        println!("{}={}", selector.to_ascii_uppercase(), reply);
    }
    Ok(())
}
