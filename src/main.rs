use std::path::PathBuf;

use clap::Parser;
use log::info;
use mace_ir::{
    ConverterOption, ConverterRegistry, DataType, DeviceType, EnumDomain, IrError, NetValidator,
    NodeInfo, load_option_from_path, logger, net_to_dot, save_net_to_path, util,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert and inspect MACE graph IR", long_about = None)]
struct Cli {
    /// Path to the source model.
    model: PathBuf,
    /// Source platform of the model.
    #[arg(long, default_value = "json")]
    platform: String,
    /// JSON file with converter options; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Graph input as `name:d0,d1,...`. May be repeated.
    #[arg(long = "input", value_name = "NODE")]
    inputs: Vec<String>,
    /// Graph output as `name:d0,d1,...`. May be repeated.
    #[arg(long = "output", value_name = "NODE")]
    outputs: Vec<String>,
    /// Target data type discriminant (1 = float, 3 = half, ...).
    #[arg(long)]
    data_type: Option<i32>,
    /// Target device discriminant (0 = cpu, 2 = gpu, 3 = hexagon).
    #[arg(long)]
    device: Option<i32>,
    /// Enable the winograd convolution transform.
    #[arg(long)]
    winograd: bool,
    /// Run structural validation on the converted graph.
    #[arg(long)]
    validate: bool,
    /// Path to write the converted graph as JSON.
    #[arg(long)]
    output_net: Option<PathBuf>,
    /// Optional path to write a Graphviz DOT export of the graph.
    #[arg(long)]
    export_dot: Option<PathBuf>,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn build_option(cli: &Cli) -> Result<ConverterOption, IrError> {
    let mut option = match &cli.config {
        Some(path) => load_option_from_path(path)?,
        None => ConverterOption::new(),
    };
    for spec in &cli.inputs {
        option.add_input_node(NodeInfo::parse(spec)?);
    }
    for spec in &cli.outputs {
        option.add_output_node(NodeInfo::parse(spec)?);
    }
    if let Some(value) = cli.data_type {
        option.set_data_type(DataType::from_discriminant(value)?);
    }
    if let Some(value) = cli.device {
        option.set_device(DeviceType::from_discriminant(value)?);
    }
    if cli.winograd {
        option.set_winograd_enabled(true);
    }
    Ok(option)
}

fn run(cli: Cli) -> Result<(), IrError> {
    let option = build_option(&cli)?;
    let net = ConverterRegistry::with_defaults().convert(&cli.platform, &cli.model, &option)?;

    println!(
        "Converted `{}` into net `{}` with {} operators.",
        cli.model.display(),
        net.name,
        net.ops.len()
    );
    println!(
        "Data format: {:?}, filter format: {:?}",
        util::data_format(&net),
        util::filter_format(&net)
    );
    println!("Inputs:");
    for node in option.input_nodes().values() {
        println!("  - {}", node);
    }
    println!("Outputs:");
    for node in option.output_nodes().values() {
        println!("  - {}", node);
    }

    if cli.validate {
        let artifacts = NetValidator::new(&net).validate()?;
        println!("Validated graph.");
        println!("External tensors: {}", artifacts.external_tensors.join(", "));
        println!("Terminal tensors: {}", artifacts.terminal_tensors.join(", "));
    }

    if let Some(path) = &cli.output_net {
        save_net_to_path(&net, path)?;
        info!("wrote converted net to `{}`", path.display());
    }

    if let Some(dot_path) = &cli.export_dot {
        let dot = net_to_dot(&net);
        std::fs::write(dot_path, dot).map_err(|err| IrError::export(dot_path, err))?;
        println!("Exported Graphviz DOT to `{}`.", dot_path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = logger::init_log(cli.verbose) {
        eprintln!("warning: logging is unavailable: {}", err);
    }
    if let Err(err) = run(cli) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
