//! constancia CLI - certificate PDF generator

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use constancia::assets::{ENV_FONT_BOLD, ENV_FONT_REGULAR, ENV_LOGO};
use constancia::{long_date, AssetConfig, Assets, DocumentFields, Inspection};

#[derive(Parser)]
#[command(name = "constancia")]
#[command(author = "Concertinos")]
#[command(version)]
#[command(about = "Generate fixed-layout certificate (constancia) PDFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a certificate PDF
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Write a fields file with example values
    Sample {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show information about a generated PDF
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Also list every text line on the page
        #[arg(long)]
        text: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// JSON file with the certificate fields
    #[arg(long, value_name = "FILE")]
    fields: Option<PathBuf>,

    /// Document title
    #[arg(long)]
    titulo: Option<String>,

    /// Body text; line breaks separate paragraphs
    #[arg(long)]
    cuerpo: Option<String>,

    /// Read the body text from a file
    #[arg(long, value_name = "FILE", conflicts_with = "cuerpo")]
    cuerpo_file: Option<PathBuf>,

    /// City for the closing sentence
    #[arg(long)]
    ciudad: Option<String>,

    /// Date for the closing sentence (defaults to today)
    #[arg(long)]
    fecha: Option<String>,

    /// Signer name
    #[arg(long)]
    nombre: Option<String>,

    /// Signer role
    #[arg(long)]
    cargo: Option<String>,

    /// Signer organization
    #[arg(long)]
    organizacion: Option<String>,

    /// Contact email
    #[arg(long)]
    email: Option<String>,

    /// Contact phone
    #[arg(long)]
    celular: Option<String>,

    /// Contact address
    #[arg(long)]
    direccion: Option<String>,

    /// Logo image (JPEG or PNG)
    #[arg(long, env = ENV_LOGO, value_name = "FILE")]
    logo: Option<PathBuf>,

    /// Regular-weight TrueType font
    #[arg(long, env = ENV_FONT_REGULAR, value_name = "FILE", requires = "font_bold")]
    font: Option<PathBuf>,

    /// Bold-weight TrueType font
    #[arg(long, env = ENV_FONT_BOLD, value_name = "FILE", requires = "font")]
    font_bold: Option<PathBuf>,

    /// Use the standard PDF faces instead of TrueType files
    #[arg(long, conflicts_with_all = ["font", "font_bold"])]
    standard_fonts: bool,

    /// Output file
    #[arg(short, long, value_name = "FILE", default_value = "constancia.pdf")]
    output: PathBuf,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate(args) => cmd_generate(&args),
        Commands::Sample { output } => cmd_sample(output.as_deref()),
        Commands::Info { input, text } => cmd_info(&input, text),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_generate(args: &GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let fields = collect_fields(args)?;

    let mut config = AssetConfig::from_env();
    if let Some(ref logo) = args.logo {
        config = config.with_logo(logo);
    }
    if let (Some(regular), Some(bold)) = (&args.font, &args.font_bold) {
        config = config.with_font_files(regular, bold);
    }
    if args.standard_fonts {
        config = config.with_standard_fonts();
    }

    let assets = Assets::load(&config)?;
    constancia::generate_to_file(&fields, &assets, &args.output)?;

    println!(
        "{} {}",
        "Created".green().bold(),
        args.output.display().to_string().cyan()
    );
    Ok(())
}

/// Merge the fields file (if any) with the individual flags; flags win.
fn collect_fields(args: &GenerateArgs) -> Result<DocumentFields, Box<dyn std::error::Error>> {
    let mut fields = match args.fields {
        Some(ref path) => {
            let json = fs::read_to_string(path)?;
            DocumentFields::from_json(&json)?
        }
        None => DocumentFields::default(),
    };

    let body = match args.cuerpo_file {
        Some(ref path) => Some(fs::read_to_string(path)?),
        None => args.cuerpo.clone(),
    };

    let overrides = [
        (&mut fields.title, args.titulo.clone()),
        (&mut fields.body, body),
        (&mut fields.city, args.ciudad.clone()),
        (&mut fields.date, args.fecha.clone()),
        (&mut fields.signer_name, args.nombre.clone()),
        (&mut fields.signer_role, args.cargo.clone()),
        (&mut fields.organization, args.organizacion.clone()),
        (&mut fields.email, args.email.clone()),
        (&mut fields.phone, args.celular.clone()),
        (&mut fields.address, args.direccion.clone()),
    ];
    for (slot, value) in overrides {
        if let Some(value) = value {
            *slot = value;
        }
    }

    if fields.date.is_empty() {
        fields.date = long_date(chrono::Local::now().date_naive());
    }
    if fields.title.is_empty() {
        log::warn!("generating a certificate without a title");
    }

    Ok(fields)
}

fn sample_fields() -> DocumentFields {
    DocumentFields::new(
        "Constancia estudiantil",
        "Por medio de la presente se hace constar que la joven María Fernanda \
         López García está inscrita en esta institución, donde recibe apoyo \
         para seguir desarrollando sus habilidades conductuales, cognitivas, \
         emocionales y sociales, desde el año 2018 a la fecha; observando \
         siempre una puntual asistencia y constancia en su desempeño.",
    )
    .with_city("Chihuahua, Chihuahua")
    .with_date("los 19 días del mes de Octubre del 2025")
    .with_signer(
        "Lic. Nombre Apellido",
        "Directora",
        "CONCERTINOS: Centro para personas con Diversidad Funcional",
    )
    .with_email("contacto@ejemplo.org")
    .with_phone("614 000 0000")
    .with_address("Calle Pino 607")
}

fn cmd_sample(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = sample_fields().to_json()?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {}",
            "Created".green().bold(),
            path.display().to_string().cyan()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, show_text: bool) -> Result<(), Box<dyn std::error::Error>> {
    let inspection = Inspection::from_path(input)?;
    let info = &inspection.info;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), info.version);
    println!("{}: {}", "Pages".bold(), info.page_count);
    println!(
        "{}: {} x {} pt",
        "Page size".bold(),
        info.page_size.0,
        info.page_size.1
    );

    if let Some(ref title) = info.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref producer) = info.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let lines = inspection.texts().count();
    let words: usize = inspection
        .texts()
        .map(|run| run.text.split_whitespace().count())
        .sum();
    let images = inspection
        .elements
        .iter()
        .filter(|e| matches!(e, constancia::inspect::Element::Image { .. }))
        .count();

    println!("{}: {}", "Text runs".bold(), lines);
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Images".bold(), images);

    if show_text {
        println!();
        println!("{}", "Text".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for run in inspection.texts() {
            println!("{:>7.1}  {}", run.y, run.text);
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "constancia".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Certificate PDF generator");
    println!();
    println!("License: MIT");
}
