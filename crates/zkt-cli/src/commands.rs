use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use zkt_contract::{AuditReport, ContractConfig, ZakatContract};
use zkt_store::{load_snapshot, save_snapshot, InMemoryKvStore};
use zkt_types::{Status, Timestamp, ZakatRecord, ZakatWire};

use crate::cli::*;

type Contract = ZakatContract<InMemoryKvStore>;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    execute(cli, &mut stdout.lock())
}

fn execute(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let store = load_snapshot(&cli.state)
        .with_context(|| format!("loading ledger state from {}", cli.state.display()))?;
    let contract = ZakatContract::with_config(store, config);
    let format = cli.format;

    let mutated = match cli.command {
        Command::Bootstrap(args) => cmd_bootstrap(&contract, args, format, out)?,
        Command::Create(args) => cmd_create(&contract, args, format, out)?,
        Command::Query(args) => cmd_query(&contract, args, format, out)?,
        Command::List(args) => cmd_list(&contract, args, format, out)?,
        Command::Distribute(args) => cmd_distribute(&contract, args, format, out)?,
        Command::Exists(args) => cmd_exists(&contract, args, format, out)?,
        Command::Audit(args) => cmd_audit(&contract, args, format, out)?,
    };

    if mutated {
        save_snapshot(contract.store(), &cli.state)
            .with_context(|| format!("saving ledger state to {}", cli.state.display()))?;
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ContractConfig> {
    let Some(path) = path else {
        return Ok(ContractConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    ContractConfig::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
}

// Each command returns whether it changed the ledger.

fn cmd_bootstrap(
    contract: &Contract,
    args: BootstrapArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let record = match args.at {
        Some(at) => {
            let at = Timestamp::parse(&at).with_context(|| format!("invalid --at {at:?}"))?;
            contract.bootstrap_at(at)?
        }
        None => contract.bootstrap()?,
    };
    match format {
        OutputFormat::Json => print_json(out, &ZakatWire::from(&record))?,
        OutputFormat::Text => {
            writeln!(out, "{} Ledger initialized", "✓".green().bold())?;
            print_record(out, &record)?;
        }
    }
    Ok(true)
}

fn cmd_create(
    contract: &Contract,
    args: CreateArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let record = contract.create_record(
        &args.id,
        &args.donor,
        args.amount,
        &args.kind,
        &args.organization,
        &args.at,
    )?;
    match format {
        OutputFormat::Json => print_json(out, &ZakatWire::from(&record))?,
        OutputFormat::Text => {
            writeln!(out, "{} Zakat collected", "✓".green().bold())?;
            print_record(out, &record)?;
        }
    }
    Ok(true)
}

fn cmd_query(
    contract: &Contract,
    args: QueryArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let record = contract.query_record(&args.id)?;
    match format {
        OutputFormat::Json => print_json(out, &ZakatWire::from(&record))?,
        OutputFormat::Text => print_record(out, &record)?,
    }
    Ok(false)
}

fn cmd_list(
    contract: &Contract,
    args: ListArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let mut records = Vec::new();
    for record in contract.list_records()? {
        let record = record?;
        if args.pending && record.is_distributed() {
            continue;
        }
        records.push(record);
    }

    match format {
        OutputFormat::Json => {
            let wire: Vec<ZakatWire> = records.iter().map(ZakatWire::from).collect();
            print_json(out, &wire)?;
        }
        OutputFormat::Text if records.is_empty() => writeln!(out, "No records.")?,
        OutputFormat::Text => {
            for record in &records {
                writeln!(
                    out,
                    "{}  {:<11}  {:>14}  {:<6}  {}  {}",
                    record.id.as_str().yellow(),
                    status_label(record.status()),
                    record.amount,
                    record.kind.as_str(),
                    record.organization.as_str(),
                    record.donor_name,
                )?;
            }
            writeln!(out, "{} record(s)", records.len().to_string().bold())?;
        }
    }
    Ok(false)
}

fn cmd_distribute(
    contract: &Contract,
    args: DistributeArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let record = contract.distribute_record(&args.id, &args.recipient, args.amount, &args.at)?;
    match format {
        OutputFormat::Json => print_json(out, &ZakatWire::from(&record))?,
        OutputFormat::Text => {
            writeln!(out, "{} Zakat distributed", "✓".green().bold())?;
            print_record(out, &record)?;
        }
    }
    Ok(true)
}

fn cmd_exists(
    contract: &Contract,
    args: ExistsArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let exists = contract.record_exists(&args.id)?;
    match format {
        OutputFormat::Json => print_json(out, &serde_json::json!({ "ID": args.id, "exists": exists }))?,
        OutputFormat::Text => writeln!(out, "{exists}")?,
    }
    Ok(false)
}

fn cmd_audit(
    contract: &Contract,
    args: AuditArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let report = contract.audit()?;
    match format {
        OutputFormat::Json => print_json(out, &report)?,
        OutputFormat::Text => print_audit(out, &report)?,
    }
    if args.strict && !report.is_clean() {
        bail!("audit found {} violation(s)", report.violations.len());
    }
    Ok(false)
}

// ---- Output ----

fn print_json<T: serde::Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn status_label(status: Status) -> colored::ColoredString {
    match status {
        Status::Collected => status.as_str().cyan(),
        Status::Distributed => status.as_str().green(),
    }
}

fn print_record(out: &mut impl Write, record: &ZakatRecord) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}  {}",
        record.id.as_str().yellow().bold(),
        status_label(record.status())
    )?;
    writeln!(out, "  Donor: {}", record.donor_name)?;
    writeln!(out, "  Amount: {}", record.amount)?;
    writeln!(out, "  Kind: {}", record.kind)?;
    writeln!(out, "  Organization: {}", record.organization)?;
    writeln!(out, "  Collected: {}", record.collected_at)?;
    if let Some(d) = record.distribution() {
        writeln!(out, "  Recipient: {}", d.recipient_name.bold())?;
        writeln!(out, "  Distributed: {} at {}", d.amount, d.distributed_at)?;
    }
    Ok(())
}

fn print_audit(out: &mut impl Write, report: &AuditReport) -> anyhow::Result<()> {
    let t = &report.totals;
    writeln!(
        out,
        "Records: {} ({} distributed, {} pending)",
        t.records.to_string().bold(),
        t.distributed_records,
        report.pending.len()
    )?;
    writeln!(
        out,
        "Collected: {}  Distributed: {}  Undistributed: {}",
        t.collected,
        t.distributed,
        t.undistributed()
    )?;
    for (org, totals) in &report.by_organization {
        writeln!(
            out,
            "  {:<12} {:>3} record(s)  collected {}  distributed {}",
            org.as_str(),
            totals.records,
            totals.collected,
            totals.distributed
        )?;
    }
    for (kind, totals) in &report.by_kind {
        writeln!(
            out,
            "  {:<12} {:>3} record(s)  collected {}  distributed {}",
            kind.as_str(),
            totals.records,
            totals.collected,
            totals.distributed
        )?;
    }
    writeln!(out, "State digest: {}", report.state_digest.cyan())?;
    if report.is_clean() {
        writeln!(out, "{} No violations.", "✓".green().bold())?;
    } else {
        for v in &report.violations {
            writeln!(out, "{} {}: {}", "✗".red().bold(), v.key.yellow(), v.description)?;
        }
    }
    Ok(())
}
