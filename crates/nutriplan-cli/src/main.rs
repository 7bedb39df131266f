//! Nutriplan CLI - printable nutrition pages from diet plan text.

mod config;
mod io;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use nutriplan::ai::{
    CredentialStore, DEFAULT_SYSTEM_PROMPT, GenerationRequest, ProviderConfig, ProviderError,
    ProviderKind, mask_key, provider_for,
};
use chrono::NaiveDateTime;
use nutriplan::compose::{
    ExportOptions, ExportOutput, ExportSession, InsertionPlan, PageImage, PdfCompositor,
    PrerenderedPages, normalize_insert_after, output_file_name, parse_insert_after,
};
use nutriplan::{
    BeforeAfter, ConversionResult, DietPlan, Document, EmitOptions, FidelityWarning,
    LayoutOptions, PageKind, RenderedPage, Resource, Severity,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::io::{read_input, write_output};

#[derive(Parser)]
#[command(name = "nutriplan")]
#[command(author, version, about = "Turn diet plan text into printable nutrition pages", long_about = None)]
struct Cli {
    /// Settings file (default: <config dir>/nutriplan/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render plan text into pages
    Render {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Output file (omit or use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Html)]
        format: Format,

        /// Write a complete print document instead of a fragment
        #[arg(long)]
        full: bool,

        #[command(flatten)]
        style: StyleArgs,

        #[command(flatten)]
        before_after: BeforeAfterArgs,
    },

    /// Print the parsed plan as JSON
    Parse {
        /// Input file (use - for stdin)
        input: PathBuf,
    },

    /// Write each page as a standalone HTML file
    Pages {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Directory to write pages into
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        style: StyleArgs,

        #[command(flatten)]
        before_after: BeforeAfterArgs,
    },

    /// Show where rendered pages would land in the base document
    Plan {
        /// Number of nutrition pages (notes and diet)
        #[arg(long)]
        pages: usize,

        /// Include a before/after page
        #[arg(long)]
        before_after: bool,

        /// Page the nutrition pages follow (0 or invalid means 5)
        #[arg(long)]
        insert_after: Option<String>,
    },

    /// Insert the rendered pages into a base PDF
    Export {
        /// Input file (use - for stdin)
        input: PathBuf,

        /// Base PDF the pages go into
        #[arg(long)]
        base: PathBuf,

        /// JPEG of each rendered page, in the order `pages` writes them
        #[arg(long = "page-image", value_name = "JPEG", required = true)]
        page_images: Vec<PathBuf>,

        /// Page the nutrition pages follow (0 or invalid means 5)
        #[arg(long)]
        insert_after: Option<String>,

        /// Output file (default: NutritionPlan_<date>_<time>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,

        #[command(flatten)]
        before_after: BeforeAfterArgs,
    },

    /// Draft plan text from client data with an AI provider
    Generate {
        /// Client data file (use - for stdin)
        input: PathBuf,

        /// Where to write the plan text (omit or use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also render the plan to a print-ready HTML file
        #[arg(long, value_name = "HTML")]
        render: Option<PathBuf>,

        /// API key; the prefix picks the provider
        #[arg(long, env = "NUTRIPLAN_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// File with the system prompt
        #[arg(long)]
        system_prompt: Option<PathBuf>,

        /// Override the provider base URL
        #[arg(long, hide = true)]
        base_url: Option<String>,
    },

    /// Manage the stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// List output formats
    Formats,
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store a key
    Set { value: String },
    /// Show the stored key, masked
    Show,
    /// Remove the stored key
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Json,
    Text,
}

impl Format {
    fn name(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Json => "json",
            Format::Text => "text",
        }
    }
}

/// Stylesheet and background overrides.
#[derive(Args, Debug, Default)]
struct StyleArgs {
    /// Stylesheet replacing the built-in one
    #[arg(long)]
    stylesheet: Option<PathBuf>,

    /// Image drawn behind every page (CSS url)
    #[arg(long)]
    background: Option<String>,
}

/// Data for the before/after photo page, added when there is a client name
/// or a photo.
#[derive(Args, Debug, Default)]
struct BeforeAfterArgs {
    /// Client name on the before/after page
    #[arg(long)]
    client_name: Option<String>,

    /// "Before" photo (PNG, JPEG, GIF or WebP)
    #[arg(long)]
    before_image: Option<PathBuf>,

    /// "After" photo (PNG, JPEG, GIF or WebP)
    #[arg(long)]
    after_image: Option<PathBuf>,

    /// Caption under the "before" photo
    #[arg(long)]
    before_label: Option<String>,

    /// Caption under the "after" photo
    #[arg(long)]
    after_label: Option<String>,

    /// Notes on the before/after page
    #[arg(long)]
    ba_notes: Option<String>,
}

impl BeforeAfterArgs {
    async fn load(&self) -> Result<Option<BeforeAfter>> {
        let mut data = BeforeAfter::new()
            .with_client_name(self.client_name.clone().unwrap_or_default())
            .with_labels(
                self.before_label.clone().unwrap_or_default(),
                self.after_label.clone().unwrap_or_default(),
            )
            .with_notes(self.ba_notes.clone().unwrap_or_default());
        if let Some(path) = &self.before_image {
            data = data.with_before_image(load_image(path).await?);
        }
        if let Some(path) = &self.after_image {
            data = data.with_after_image(load_image(path).await?);
        }

        if data.has_content() {
            return Ok(Some(data));
        }
        if self.before_label.is_some() || self.after_label.is_some() || self.ba_notes.is_some() {
            warn!("before/after page needs a client name or a photo, skipping it");
        }
        Ok(None)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "nutriplan=debug" } else { "nutriplan=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            input,
            output,
            format,
            full,
            style,
            before_after,
        } => {
            let doc = load_document(&input, &before_after).await?;
            let mut options = emit_options(&config, &style).await?;
            options.full_document = full;
            let bytes = emit(&doc, format, &options)?;
            write_output(output.as_deref(), &bytes).await?;
        }
        Commands::Parse { input } => {
            let plan = parse_plan(&read_input(&input).await?);
            let json = nutriplan::json::emit_plan(&plan, &EmitOptions::default().pretty())?;
            write_output(None, &json).await?;
        }
        Commands::Pages {
            input,
            output,
            style,
            before_after,
        } => {
            let doc = load_document(&input, &before_after).await?;
            let options = emit_options(&config, &style).await?.full_document();
            write_pages(&doc, &options, &output).await?;
        }
        Commands::Plan {
            pages,
            before_after,
            insert_after,
        } => {
            let insert_after = resolve_insert_after(insert_after.as_deref(), &config);
            print_plan(&plan_kinds(pages, before_after), insert_after);
        }
        Commands::Export {
            input,
            base,
            page_images,
            insert_after,
            output,
            style,
            before_after,
        } => {
            let doc = load_document(&input, &before_after).await?;
            let options = emit_options(&config, &style).await?.full_document();
            let pages = report(nutriplan::html::emit_pages(&doc, &options)?);
            let insert_after = resolve_insert_after(insert_after.as_deref(), &config);

            let now = chrono::Local::now().naive_local();
            let exported = export_pages(&pages, &base, &page_images, insert_after, now).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(&exported.file_name));
            write_output(Some(&path), &exported.bytes).await?;
            info!(path = %path.display(), pages = pages.len(), "exported plan");
        }
        Commands::Generate {
            input,
            output,
            render,
            api_key,
            system_prompt,
            base_url,
        } => {
            let system_prompt = match system_prompt.or(config.system_prompt_file.clone()) {
                Some(path) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => DEFAULT_SYSTEM_PROMPT.to_owned(),
            };
            let client_data = read_input(&input).await?;
            let api_key = resolve_api_key(api_key)?;

            let mut provider_config = ProviderConfig::new(api_key);
            if let Some(url) = base_url {
                provider_config = provider_config.with_base_url(url);
            }
            let provider = provider_for(&provider_config)?;
            info!(provider = provider.name(), "generating plan");

            let text = provider
                .generate(&GenerationRequest::new(system_prompt, client_data))
                .await?;
            write_output(output.as_deref(), text.as_bytes()).await?;

            if let Some(path) = render {
                let result = nutriplan::layout(&parse_plan(&text), &LayoutOptions::default());
                let doc = report(result);
                let options = emit_options(&config, &StyleArgs::default())
                    .await?
                    .full_document();
                let bytes = emit(&doc, Format::Html, &options)?;
                write_output(Some(&path), &bytes).await?;
                info!(path = %path.display(), "rendered plan");
            }
        }
        Commands::Key { action } => manage_key(action)?,
        Commands::Formats => list_formats(),
    }

    Ok(())
}

fn parse_plan(text: &str) -> DietPlan {
    report(nutriplan::plan::parse_with_report(text))
}

async fn load_document(input: &Path, before_after: &BeforeAfterArgs) -> Result<Document> {
    let plan = parse_plan(&read_input(input).await?);
    let mut options = LayoutOptions::default();
    if let Some(data) = before_after.load().await? {
        options = options.with_before_after(data);
    }
    Ok(report(nutriplan::layout(&plan, &options)))
}

async fn load_image(path: &Path) -> Result<Resource> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Resource::image(data)
        .map(|r| r.with_name(name))
        .ok_or_else(|| anyhow!("{}: not a PNG, JPEG, GIF or WebP image", path.display()))
}

async fn emit_options(config: &Config, style: &StyleArgs) -> Result<EmitOptions> {
    let mut options = EmitOptions::default();
    if let Some(path) = style.stylesheet.as_ref().or(config.stylesheet.as_ref()) {
        let css = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read stylesheet {}", path.display()))?;
        options = options.with_stylesheet(css);
    }
    if let Some(url) = style.background.as_ref().or(config.background.as_ref()) {
        options = options.with_background(url.clone());
    }
    Ok(options)
}

fn emit(doc: &Document, format: Format, options: &EmitOptions) -> Result<Vec<u8>> {
    let emitter = nutriplan::emitter_for(format.name())
        .ok_or_else(|| anyhow!("no writer for {} format", format.name()))?;
    Ok(report(emitter.emit(doc, options)?))
}

async fn write_pages(doc: &Document, options: &EmitOptions, dir: &Path) -> Result<()> {
    let pages = report(nutriplan::html::emit_pages(doc, options)?);
    if pages.is_empty() {
        bail!("the plan has no pages to write");
    }

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;
    for (i, page) in pages.iter().enumerate() {
        let path = dir.join(page_file_name(i, page.kind));
        write_output(Some(&path), page.html.as_bytes()).await?;
        info!(path = %path.display(), "wrote page");
    }
    Ok(())
}

fn page_file_name(index: usize, kind: PageKind) -> String {
    format!("{:02}-{}.html", index + 1, kind.as_str())
}

/// Page kinds for a plan preview: an optional before/after page, then
/// notes pages, then the diet page last.
fn plan_kinds(pages: usize, before_after: bool) -> Vec<PageKind> {
    let mut kinds = Vec::with_capacity(pages + 1);
    if before_after {
        kinds.push(PageKind::BeforeAfter);
    }
    kinds.extend((1..pages).map(|_| PageKind::Notes));
    if pages > 0 {
        kinds.push(PageKind::Diet);
    }
    kinds
}

fn resolve_insert_after(flag: Option<&str>, config: &Config) -> usize {
    match flag {
        Some(value) => parse_insert_after(value),
        None => normalize_insert_after(config.insert_after),
    }
}

/// Splice `pages` into the base PDF, one JPEG per page.
async fn export_pages(
    pages: &[RenderedPage],
    base: &Path,
    images: &[PathBuf],
    insert_after: usize,
    now: NaiveDateTime,
) -> Result<ExportOutput> {
    if pages.is_empty() {
        bail!("the plan has no pages to export");
    }
    if images.len() != pages.len() {
        let kinds: Vec<&str> = pages.iter().map(|p| p.kind.as_str()).collect();
        bail!(
            "expected {} page images ({}), got {}",
            pages.len(),
            kinds.join(", "),
            images.len()
        );
    }

    let mut jpegs = Vec::with_capacity(images.len());
    for path in images {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let image = PageImage::from_jpeg(bytes)
            .with_context(|| format!("{}: not a usable JPEG", path.display()))?;
        jpegs.push(image);
    }

    let mut session = ExportSession::new();
    session
        .load_base_file(base)
        .with_context(|| format!("failed to read base document {}", base.display()))?;

    let rasterizer = PrerenderedPages::new(pages.iter().cloned(), jpegs);
    let options = ExportOptions::default().with_insert_after(insert_after);
    Ok(session.export(pages, &rasterizer, &PdfCompositor::new(), &options, now)?)
}

fn print_plan(kinds: &[PageKind], insert_after: usize) {
    let plan = InsertionPlan::new(kinds, insert_after);
    println!("  {:4} {:14} {}", "PAGE", "KIND", "INSERT AT");
    for page in &plan.pages {
        println!(
            "  {:<4} {:14} {}",
            page.source + 1,
            kinds[page.source].as_str(),
            page.index
        );
    }
    let now = chrono::Local::now().naive_local();
    println!("\noutput: {}", output_file_name(&now));
}

fn credential_store() -> Result<CredentialStore> {
    CredentialStore::default_location().ok_or_else(|| anyhow!("no config directory on this system"))
}

fn resolve_api_key(explicit: Option<String>) -> Result<String> {
    if let Some(key) = explicit.filter(|k| !k.trim().is_empty()) {
        return Ok(key);
    }
    credential_store()?
        .load()?
        .ok_or_else(|| ProviderError::MissingCredential.into())
}

fn manage_key(action: KeyAction) -> Result<()> {
    let store = credential_store()?;
    match action {
        KeyAction::Set { value } => {
            store.save(&value)?;
            println!(
                "stored {} key in {}",
                ProviderKind::detect(&value),
                store.path().display()
            );
        }
        KeyAction::Show => match store.load()? {
            Some(key) => println!("{} ({})", mask_key(&key), ProviderKind::detect(&key)),
            None => println!("no API key stored"),
        },
        KeyAction::Clear => {
            if store.clear()? {
                println!("API key removed");
            } else {
                println!("no API key stored");
            }
        }
    }
    Ok(())
}

/// Log fidelity warnings and hand back the value.
fn report<T>(result: ConversionResult<T>) -> T {
    for warning in &result.warnings {
        log_warning(warning);
    }
    result.value
}

fn log_warning(warning: &FidelityWarning) {
    match (warning.severity, warning.line) {
        (Severity::Minor, Some(line)) => warn!(line = line + 1, "{}", warning.message),
        (Severity::Minor, None) => warn!("{}", warning.message),
        (Severity::Info, Some(line)) => info!(line = line + 1, "{}", warning.message),
        (Severity::Info, None) => info!("{}", warning.message),
    }
}

fn list_formats() {
    println!("Available output formats:\n");
    println!("  {:8} NAMES", "FORMAT");
    println!("  {:8} -----", "------");
    for format in Format::value_variants() {
        let names = nutriplan::emitter_for(format.name())
            .map(|e| e.formats().join(", "))
            .unwrap_or_else(|| "-".to_owned());
        println!("  {:8} {}", format.name(), names);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_args() {
        let cli = Cli::try_parse_from([
            "nutriplan",
            "render",
            "plan.txt",
            "--format",
            "json",
            "--client-name",
            "Ali",
        ])
        .unwrap();

        match cli.command {
            Commands::Render {
                input,
                format,
                full,
                before_after,
                ..
            } => {
                assert_eq!(input, PathBuf::from("plan.txt"));
                assert_eq!(format, Format::Json);
                assert!(!full);
                assert_eq!(before_after.client_name.as_deref(), Some("Ali"));
            }
            _ => panic!("expected render"),
        }
    }

    #[tokio::test]
    async fn test_before_after_needs_name_or_photo() {
        assert!(BeforeAfterArgs::default().load().await.unwrap().is_none());

        let notes_only = BeforeAfterArgs {
            ba_notes: Some("استمر".into()),
            before_label: Some("قبل".into()),
            ..Default::default()
        };
        assert!(notes_only.load().await.unwrap().is_none());

        let named = BeforeAfterArgs {
            client_name: Some("سارة".into()),
            ..Default::default()
        };
        assert!(named.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_before_after_from_photo_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("after.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let args = BeforeAfterArgs {
            after_image: Some(path),
            ..Default::default()
        };
        let doc = load_document_from(&args, "الغداء دجاج").await;
        assert_eq!(
            doc.pages().map(|(kind, _)| kind).collect::<Vec<_>>(),
            vec![PageKind::BeforeAfter, PageKind::Diet]
        );
    }

    async fn load_document_from(args: &BeforeAfterArgs, text: &str) -> Document {
        let mut options = LayoutOptions::default();
        if let Some(data) = args.load().await.unwrap() {
            options = options.with_before_after(data);
        }
        nutriplan::layout(&nutriplan::plan::parse(text), &options).value
    }

    #[test]
    fn test_plan_kinds() {
        assert!(plan_kinds(0, false).is_empty());
        assert_eq!(
            plan_kinds(2, true),
            vec![PageKind::BeforeAfter, PageKind::Notes, PageKind::Diet]
        );
        assert_eq!(plan_kinds(1, false), vec![PageKind::Diet]);
    }

    #[test]
    fn test_page_file_name() {
        assert_eq!(page_file_name(0, PageKind::BeforeAfter), "01-before_after.html");
        assert_eq!(page_file_name(11, PageKind::Diet), "12-diet.html");
    }

    #[test]
    fn test_emit_each_format() {
        let plan = nutriplan::plan::parse("الغداء أرز\nسعرات 1800");
        let doc = nutriplan::layout(&plan, &LayoutOptions::default()).value;

        for format in Format::value_variants() {
            let bytes = emit(&doc, *format, &EmitOptions::default()).unwrap();
            let text = String::from_utf8(bytes).unwrap();
            assert!(text.contains("1800"), "{} output lacks calories", format.name());
        }
    }

    #[test]
    fn test_explicit_api_key_wins() {
        assert_eq!(
            resolve_api_key(Some("sk-flag".into())).unwrap(),
            "sk-flag".to_string()
        );
    }

    #[tokio::test]
    async fn test_write_pages() {
        let dir = tempfile::tempdir().unwrap();
        let plan = nutriplan::plan::parse("ملاحظات نم جيدا\nالعشاء سلطة");
        let doc = nutriplan::layout(&plan, &LayoutOptions::default()).value;

        write_pages(&doc, &EmitOptions::default().full_document(), dir.path())
            .await
            .unwrap();

        let notes = std::fs::read_to_string(dir.path().join("01-notes.html")).unwrap();
        assert!(notes.contains("نم جيدا"));
        assert!(dir.path().join("02-diet.html").exists());
    }

    #[tokio::test]
    async fn test_write_pages_rejects_empty_plan() {
        let dir = tempfile::tempdir().unwrap();
        let doc = nutriplan::layout(&DietPlan::new(), &LayoutOptions::default()).value;
        let err = write_pages(&doc, &EmitOptions::default(), dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no pages"));
    }

    /// SOI, a baseline frame header for a 16x8 RGB image, EOI.
    const TINY_JPEG: [u8; 23] = [
        0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x08, 0x00, 0x10, 0x03, 0x01, 0x11, 0x00,
        0x02, 0x11, 0x01, 0x03, 0x11, 0x01, 0xFF, 0xD9,
    ];

    fn letter_pdf(pages: usize) -> Vec<u8> {
        let mut doc = oxidize_pdf::Document::new();
        for _ in 0..pages {
            doc.add_page(oxidize_pdf::Page::letter());
        }
        let mut bytes = Vec::new();
        doc.write(&mut bytes).unwrap();
        bytes
    }

    fn page_widths(pdf: &[u8]) -> Vec<f64> {
        let doc = oxidize_pdf::PdfReader::new(std::io::Cursor::new(pdf))
            .unwrap()
            .into_document();
        (0..doc.page_count().unwrap())
            .map(|i| doc.get_page(i).unwrap().width().round())
            .collect()
    }

    fn sample_pages() -> Vec<RenderedPage> {
        let plan = nutriplan::plan::parse("ملاحظات نم جيدا\nالعشاء سلطة");
        let doc = nutriplan::layout(&plan, &LayoutOptions::default()).value;
        nutriplan::html::emit_pages(&doc, &EmitOptions::default())
            .unwrap()
            .value
    }

    fn now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
            .and_then(|d| d.and_hms_opt(18, 30, 0))
            .unwrap()
    }

    #[tokio::test]
    async fn test_export_pages_into_base_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("master.pdf");
        std::fs::write(&base, letter_pdf(4)).unwrap();
        let images: Vec<PathBuf> = (1..=2)
            .map(|n| {
                let path = dir.path().join(format!("page{n}.jpg"));
                std::fs::write(&path, TINY_JPEG).unwrap();
                path
            })
            .collect();

        let out = export_pages(&sample_pages(), &base, &images, 2, now())
            .await
            .unwrap();

        assert_eq!(out.file_name, "NutritionPlan_2025-01-02_18-30.pdf");
        // Notes and diet land after page 2 of the four Letter pages.
        assert_eq!(
            page_widths(&out.bytes),
            vec![612.0, 612.0, 595.0, 595.0, 612.0, 612.0]
        );
    }

    #[tokio::test]
    async fn test_export_needs_one_image_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("master.pdf");
        std::fs::write(&base, letter_pdf(1)).unwrap();
        let image = dir.path().join("page.jpg");
        std::fs::write(&image, TINY_JPEG).unwrap();

        let err = export_pages(&sample_pages(), &base, &[image], 5, now())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("expected 2 page images (notes, diet), got 1"));
    }

    #[tokio::test]
    async fn test_export_rejects_non_jpeg_image() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("master.pdf");
        std::fs::write(&base, letter_pdf(1)).unwrap();
        let images: Vec<PathBuf> = ["a.png", "b.png"]
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
                path
            })
            .collect();

        let err = export_pages(&sample_pages(), &base, &images, 5, now())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not a usable JPEG"));
    }

    #[test]
    fn test_export_args() {
        let cli = Cli::try_parse_from([
            "nutriplan",
            "export",
            "plan.txt",
            "--base",
            "master.pdf",
            "--page-image",
            "1.jpg",
            "--page-image",
            "2.jpg",
            "--insert-after",
            "7",
        ])
        .unwrap();

        match cli.command {
            Commands::Export {
                base,
                page_images,
                insert_after,
                output,
                ..
            } => {
                assert_eq!(base, PathBuf::from("master.pdf"));
                assert_eq!(page_images.len(), 2);
                assert_eq!(insert_after.as_deref(), Some("7"));
                assert!(output.is_none());
            }
            _ => panic!("expected export"),
        }
        assert!(Cli::try_parse_from(["nutriplan", "export", "plan.txt", "--base", "m.pdf"]).is_err());
    }

    #[tokio::test]
    async fn test_load_image_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(load_image(&path).await.is_err());

        std::fs::write(&path, [0x89, b'P', b'N', b'G', 0, 0]).unwrap();
        let image = load_image(&path).await.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.name.as_deref(), Some("photo.png"));
    }
}
