//! CLI for AdCraft - product-photo ad creatives.

use adcraft::catalog::{
    AspectRatio, CatalogOption, FrameSetting, LightingBrightness, LightingDirection,
    OutputFormat, OutputSize, ProductArrangement, ProductDirection, StylePreset,
};
use adcraft::{prompt, GeminiClient, SelectionState, Session, Studio};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "adcraft")]
#[command(about = "Turn a product photo into an ad creative and ad copy via Gemini")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an ad creative from a product photo
    Generate(GenerateArgs),

    /// List every selectable option with its id and label
    Options,
}

#[derive(Args)]
struct GenerateArgs {
    /// Product photo (JPG, PNG or WEBP)
    #[arg(short, long)]
    image: PathBuf,

    /// Background style preset
    #[arg(short, long)]
    style: StylePreset,

    /// Aspect ratio
    #[arg(long, default_value_t = AspectRatio::None)]
    aspect_ratio: AspectRatio,

    /// Camera direction on the product
    #[arg(long, default_value_t = ProductDirection::Front)]
    direction: ProductDirection,

    /// Where the light comes from
    #[arg(long, default_value_t = LightingDirection::TopLeft)]
    lighting: LightingDirection,

    /// Lighting mood
    #[arg(long, default_value_t = LightingBrightness::Studio)]
    brightness: LightingBrightness,

    /// Number of products in the shot (1-10)
    #[arg(short, long, default_value_t = 1)]
    quantity: u8,

    /// Product arrangement
    #[arg(long, default_value_t = ProductArrangement::Natural)]
    arrangement: ProductArrangement,

    /// Framing of the product
    #[arg(long, default_value_t = FrameSetting::Default)]
    frame: FrameSetting,

    /// Output resolution
    #[arg(long, default_value_t = OutputSize::None)]
    size: OutputSize,

    /// Output file format
    #[arg(long, default_value_t = OutputFormat::None)]
    format: OutputFormat,

    /// Brand name for the ad copy
    #[arg(long, default_value = "")]
    brand: String,

    /// Tone and manner for the ad copy
    #[arg(long, default_value = "")]
    tone: String,

    /// Directory to write the generated image into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Image model override
    #[arg(long)]
    image_model: Option<String>,

    /// Copy model override
    #[arg(long)]
    copy_model: Option<String>,

    /// Print the assembled instructions without calling the API
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            generate(args, cli.json).await?;
        }
        Commands::Options => {
            list_options(cli.json)?;
        }
    }

    Ok(())
}

fn selection_from_args(args: &GenerateArgs) -> anyhow::Result<SelectionState> {
    let mut state = SelectionState::new()
        .with_style(args.style)
        .with_aspect_ratio(args.aspect_ratio)
        .with_frame_setting(args.frame)
        .with_output(args.size, args.format)
        .with_copy_brief(args.brand.as_str(), args.tone.as_str());
    state.product_direction = args.direction;
    state.lighting_direction = args.lighting;
    state.lighting_brightness = args.brightness;
    state.product_arrangement = args.arrangement;
    state.set_quantity(args.quantity)?;
    state.upload_path(&args.image)?;
    Ok(state)
}

async fn generate(args: GenerateArgs, json_output: bool) -> anyhow::Result<()> {
    let state = selection_from_args(&args)?;

    if args.dry_run {
        let instructions = prompt::assemble(&state)?;
        if json_output {
            let result = serde_json::json!({
                "image_instruction": instructions.image,
                "copy_instruction": instructions.copy,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("Image instruction:\n  {}", instructions.image);
            match &instructions.copy {
                Some(copy) => println!("Copy instruction:\n  {}", copy),
                None => println!("Copy instruction: (skipped, no brand or tone)"),
            }
        }
        return Ok(());
    }

    let mut builder = GeminiClient::builder();
    if let Some(model) = &args.image_model {
        builder = builder.image_model(model);
    }
    if let Some(model) = &args.copy_model {
        builder = builder.copy_model(model);
    }
    let client = builder.build()?;
    let studio = Studio::gemini(&client);
    let mut session = Session::new();

    let result = studio.run(&mut session, &state).await;
    if let Some(error) = &result.error {
        anyhow::bail!("{}", error);
    }
    let Some(image) = &result.generated_image else {
        anyhow::bail!("{}", adcraft::AdCraftError::NoImage);
    };

    std::fs::create_dir_all(&args.output_dir)?;
    let path = image.save(&args.output_dir)?;

    if json_output {
        let result = serde_json::json!({
            "success": true,
            "output": path.display().to_string(),
            "mime_type": image.mime_type(),
            "copies": result.generated_copies,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Generated image: {}", path.display());
        if !result.generated_copies.is_empty() {
            println!("\nAd copies:");
            for (i, copy) in result.generated_copies.iter().enumerate() {
                println!("  {}. {}", i + 1, copy.copy);
            }
        }
    }

    Ok(())
}

#[derive(serde::Serialize)]
struct OptionGroup {
    group: &'static str,
    options: Vec<OptionEntry>,
}

#[derive(serde::Serialize)]
struct OptionEntry {
    id: &'static str,
    label: &'static str,
}

fn group<T: CatalogOption>() -> OptionGroup {
    OptionGroup {
        group: T::GROUP,
        options: T::ALL
            .iter()
            .map(|opt| OptionEntry {
                id: opt.id(),
                label: opt.label(),
            })
            .collect(),
    }
}

fn list_options(json_output: bool) -> anyhow::Result<()> {
    let groups = vec![
        group::<StylePreset>(),
        group::<AspectRatio>(),
        group::<ProductDirection>(),
        group::<LightingDirection>(),
        group::<LightingBrightness>(),
        group::<ProductArrangement>(),
        group::<FrameSetting>(),
        group::<OutputSize>(),
        group::<OutputFormat>(),
    ];

    if json_output {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        for g in &groups {
            println!("{}:", g.group);
            for opt in &g.options {
                println!("  {:<16} {}", opt.id, opt.label);
            }
            println!();
        }
    }

    Ok(())
}
