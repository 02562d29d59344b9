use clap::Parser;
use std::path::{Path, PathBuf};
use image_to_css_palette::{
    BrowseOptions, Catalog, ExtractOptions, Match, MatchOptions, PaletteError, Rgb, Selection,
    browse, extract_palette, load_image, match_closest, render,
};
use anyhow::Context;
use anyhow::Result;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Extract an image's color palette and name it with CSS colors.
///
/// With no mode flag the whole CSS catalog is rendered as a swatch grid.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// List CSS colors whose name contains this substring
    #[arg(short, long)]
    search: Option<String>,

    /// Extract the palette of an image and show its hex codes
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Extract the palette of an image and name each color from the CSS catalog
    #[arg(short = 't', long)]
    imagetompl: Option<PathBuf>,

    /// Comma-separated hex colors to name from the CSS catalog
    #[arg(short, long)]
    colors: Option<String>,

    /// Number of k-means clusters
    #[arg(short = 'k', long, default_value_t = 5)]
    clusters: usize,

    /// Seed for k-means initialisation
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Shrink the image so its longest side is this many pixels before clustering
    #[arg(long)]
    downscale: Option<u32>,

    /// Comma-separated name substrings to drop before matching (replaces the default list)
    #[arg(long)]
    exclude: Option<String>,

    /// Match against the full catalog, without dropping grays, whites and blacks
    #[arg(long, conflicts_with = "exclude")]
    no_exclude: bool,

    /// Pick the catalog entry with the highest score instead of the lowest
    #[arg(long)]
    maximum: bool,

    /// Keep catalog order instead of sorting by hue, saturation and value
    #[arg(long)]
    unsorted: bool,

    /// Where to write the rendered figure
    #[arg(short, long, default_value = "palette.png")]
    output: PathBuf,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug)]
enum Mode {
    Catalog,
    Search(String),
    Image(PathBuf),
    ImageToCatalog(PathBuf),
    Colors(Vec<Rgb>),
}

impl Args {
    fn mode(&self) -> Result<Mode, PaletteError> {
        if self.image.is_some() && self.imagetompl.is_some() {
            return Err(PaletteError::ConflictingOptions);
        }
        if let Some(search) = &self.search {
            return Ok(Mode::Search(search.clone()));
        }
        if let Some(path) = &self.imagetompl {
            return Ok(Mode::ImageToCatalog(path.clone()));
        }
        if let Some(path) = &self.image {
            return Ok(Mode::Image(path.clone()));
        }
        if let Some(colors) = &self.colors {
            let parsed = colors
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(Rgb::from_hex)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Mode::Colors(parsed));
        }
        Ok(Mode::Catalog)
    }

    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            k: self.clusters,
            seed: self.seed,
            downscale: self.downscale,
            ..Default::default()
        }
    }

    fn match_options(&self) -> MatchOptions {
        let mut opts = MatchOptions::default();
        if self.no_exclude {
            opts.exclude.clear();
        } else if let Some(list) = &self.exclude {
            opts.exclude = list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if self.maximum {
            opts.selection = Selection::Maximum;
        }
        opts
    }

    fn browse_options(&self, name_filter: Option<String>) -> BrowseOptions {
        BrowseOptions {
            sort_by_hue_sat_val: !self.unsorted,
            name_filter,
            similarity_query_colors: None,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "image_to_css_palette=debug,palette_cli=debug"
    } else {
        "image_to_css_palette=warn,palette_cli=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.mode()? {
        Mode::Catalog => run_catalog(&args, None),
        Mode::Search(filter) => run_catalog(&args, Some(filter)),
        Mode::Image(path) => run_image(&args, &path),
        Mode::ImageToCatalog(path) => run_image_to_catalog(&args, &path),
        Mode::Colors(colors) => run_colors(&args, &colors),
    }
}

fn run_catalog(args: &Args, filter: Option<String>) -> Result<()> {
    let entries = browse(
        Catalog::css4(),
        &args.browse_options(filter),
        &args.match_options(),
    );
    if args.json {
        let list: Vec<_> = entries
            .iter()
            .map(|e| json!({ "name": e.name, "hex": e.rgb.to_hex() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for e in &entries {
            println!("{:<22} {}", e.name, e.rgb);
        }
    }

    let colors: Vec<Rgb> = entries.iter().map(|e| e.rgb).collect();
    save(&render::render_swatch_grid(&colors), &args.output)
}

fn run_image(args: &Args, path: &Path) -> Result<()> {
    let img = load_image(path)?;
    let palette = extract_palette(&img, &args.extract_options())
        .with_context(|| format!("palette extraction failed for {}", path.display()))?;

    let hex: Vec<String> = palette.iter().map(|c| c.to_hex()).collect();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&json!({ "palette": hex }))?);
    } else {
        for h in &hex {
            println!("{h}");
        }
    }

    save(&render::render_comparison(&img, &palette), &args.output)
}

fn run_image_to_catalog(args: &Args, path: &Path) -> Result<()> {
    let img = load_image(path)?;
    let palette = extract_palette(&img, &args.extract_options())
        .with_context(|| format!("palette extraction failed for {}", path.display()))?;
    let matches = match_closest(&palette, Catalog::css4(), &args.match_options());

    print_matches(args, &matches)?;
    let swatches: Vec<Rgb> = matches.iter().map(|m| m.rgb).collect();
    save(&render::render_comparison(&img, &swatches), &args.output)
}

fn run_colors(args: &Args, colors: &[Rgb]) -> Result<()> {
    let opts = BrowseOptions {
        similarity_query_colors: Some(colors.to_vec()),
        ..args.browse_options(None)
    };
    let entries = browse(Catalog::css4(), &opts, &args.match_options());
    let matches: Vec<Match> = colors
        .iter()
        .zip(entries)
        .map(|(&query, e)| Match { query, name: e.name, rgb: e.rgb })
        .collect();

    print_matches(args, &matches)?;
    let swatches: Vec<Rgb> = matches.iter().map(|m| m.rgb).collect();
    save(&render::render_swatch_grid(&swatches), &args.output)
}

fn print_matches(args: &Args, matches: &[Match]) -> Result<()> {
    if args.json {
        let list: Vec<_> = matches
            .iter()
            .map(|m| json!({ "color": m.query.to_hex(), "name": m.name, "hex": m.rgb.to_hex() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        for m in matches {
            println!("{} → {} ({})", m.query, m.name, m.rgb);
        }
    }
    Ok(())
}

fn save(img: &image::RgbImage, path: &Path) -> Result<()> {
    render::save_png(img, path).with_context(|| format!("writing {}", path.display()))?;
    eprintln!("Saved → {}", path.display());
    Ok(())
}
