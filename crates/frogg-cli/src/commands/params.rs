//! Parameter listing command.

#![allow(clippy::print_literal)] // Table headers use literal strings

use clap::Args;
use frogg_core::{ParamDescriptor, ParamFlags, ParamScale, ParameterInfo};
use frogg_engine::{ModulationParams, PARAM_DESCRIPTORS};

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for one parameter (by key, e.g. "feedback")
    #[arg(value_name = "KEY")]
    key: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if let Some(key) = &args.key {
        let params = ModulationParams::default();
        let desc = params
            .find_param_by_key(key)
            .and_then(|i| params.param_info(i))
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", key))?;
        print_detail(&desc);
        return Ok(());
    }

    println!("Parameters");
    println!("==========");
    println!();
    println!(
        "  {:12}  {:12}  {:16}  {}",
        "Key", "Name", "Range", "Default"
    );
    println!(
        "  {:12}  {:12}  {:16}  {}",
        "---", "----", "-----", "-------"
    );

    for desc in &PARAM_DESCRIPTORS {
        println!(
            "  {:12}  {:12}  {:16}  {}",
            desc.string_id,
            desc.name,
            format_range(desc),
            format_value(desc, desc.default)
        );
    }

    println!();
    println!("Use 'frogg params <key>' for details.");
    Ok(())
}

fn print_detail(desc: &ParamDescriptor) {
    println!("{}", desc.name);
    println!("{}", "=".repeat(desc.name.len()));
    println!();
    println!("  Key:      {}", desc.string_id);
    println!("  ID:       {}", desc.id.0);
    println!("  Range:    {}", format_range(desc));
    println!("  Default:  {}", format_value(desc, desc.default));
    println!("  Step:     {}", desc.step);
    println!(
        "  Scale:    {}",
        match desc.scale {
            ParamScale::Linear => "linear",
            ParamScale::Logarithmic => "logarithmic",
        }
    );
    if desc.flags.contains(ParamFlags::STEPPED)
        && let Some(labels) = desc.step_labels
    {
        println!("  Values:   {}", labels.join(", "));
    }
}

fn format_range(desc: &ParamDescriptor) -> String {
    format!("{} - {}{}", desc.min, desc.max, desc.unit.suffix())
}

fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    match desc.step_label(value) {
        Some(label) => label.to_string(),
        None => format!("{}{}", value, desc.unit.suffix()),
    }
}
