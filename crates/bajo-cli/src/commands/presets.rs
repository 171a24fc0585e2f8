//! Preset management commands.

use super::common::{format_value, parse_set, resolve_preset};
use bajo_config::{
    Preset, ensure_user_presets_dir, factory_presets, get_factory_preset, is_factory_preset,
    list_user_presets, preset_name_from_path, system_presets_dir, user_presets_dir,
};
use bajo_effects::DESCRIPTORS;
use bajo_effects::params::find_index;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show a preset's parameter values
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a preset built from parameter overrides
    Save {
        /// Name for the new preset
        name: String,

        /// Parameter values (e.g., "delay_mix=0.4")
        #[arg(long, value_parser = parse_set, number_of_values = 1)]
        set: Vec<(String, f32)>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Overwrite if the preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name to delete
        name: String,

        /// Don't ask for confirmation
        #[arg(long)]
        force: bool,
    },

    /// Copy a factory preset to the user preset directory
    Copy {
        /// Factory preset name
        source: String,

        /// New preset name (optional, uses source name if not specified)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            set,
            description,
            force,
        } => save_preset(&name, set, description.as_deref(), force),
        PresetsCommand::Delete { name, force } => delete_preset(&name, force),
        PresetsCommand::Copy { source, name } => copy_preset(&source, name.as_deref()),
        PresetsCommand::Paths => show_paths(),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", preset.name, desc);
        }
        println!();
    }

    if show_user {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create one with: bajo presets save <name> --set key=value\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                match Preset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {:20} - {}", name, desc);
                    }
                    Err(_) => {
                        println!("  {:20} - (error loading)", name);
                    }
                }
            }
            println!();
        }
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = resolve_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
        println!();
    }

    if preset.params.is_empty() {
        println!("All parameters at their defaults.");
        return Ok(());
    }

    println!("Parameters ({}):", preset.params.len());
    for desc in &DESCRIPTORS {
        if let Some(value) = preset.param(desc.key) {
            println!("  {:16} = {}", desc.key, format_value(desc, value));
        }
    }

    println!();
    println!("Parameters not listed stay at their defaults.");

    Ok(())
}

fn save_preset(
    name: &str,
    set: Vec<(String, f32)>,
    description: Option<&str>,
    force: bool,
) -> anyhow::Result<()> {
    let dir = ensure_user_presets_dir()?;
    let preset_path = dir.join(format!("{name}.toml"));

    if preset_path.exists() && !force {
        anyhow::bail!("Preset '{name}' already exists. Use --force to overwrite.");
    }

    let mut preset = Preset::new(name);
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }
    for (key, value) in set {
        if find_index(&key).is_none() {
            anyhow::bail!("Unknown parameter '{key}'. Use 'bajo stages' to list parameters.");
        }
        preset = preset.with_param(key, value);
    }
    preset.validate()?;

    preset.save(&preset_path)?;

    println!("Saved preset '{name}' to {}", preset_path.display());
    Ok(())
}

fn delete_preset(name: &str, force: bool) -> anyhow::Result<()> {
    let preset_path = user_presets_dir().join(format!("{name}.toml"));

    // Factory presets are compiled in; only files can be deleted. A user
    // file that shadows a factory name is still just a file.
    if !preset_path.exists() {
        if is_factory_preset(name) {
            anyhow::bail!("Cannot delete factory preset '{name}'. Factory presets are built-in.");
        }
        anyhow::bail!("User preset '{name}' not found.");
    }

    if !force {
        anyhow::bail!("Use --force to confirm deletion of preset '{name}'.");
    }

    std::fs::remove_file(&preset_path)?;
    println!("Deleted preset '{name}'.");

    Ok(())
}

fn copy_preset(source: &str, new_name: Option<&str>) -> anyhow::Result<()> {
    let source_preset = get_factory_preset(source)
        .ok_or_else(|| anyhow::anyhow!("Factory preset '{source}' not found."))?;

    let target_name = new_name.unwrap_or(source);

    let dir = ensure_user_presets_dir()?;
    let preset_path = dir.join(format!("{target_name}.toml"));

    if preset_path.exists() {
        anyhow::bail!("Preset '{target_name}' already exists. Choose another name with --name.");
    }

    let mut new_preset = Preset::new(target_name);
    if let Some(desc) = &source_preset.description {
        new_preset = new_preset.with_description(format!("{desc} (copy)"));
    }
    new_preset.params.clone_from(&source_preset.params);

    new_preset.save(&preset_path)?;

    println!("Copied factory preset '{source}' to user preset '{target_name}'");
    println!("Path: {}", preset_path.display());

    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("===================");
    println!();
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", system_presets_dir().display());

    Ok(())
}
