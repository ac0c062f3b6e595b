use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use tracing::{error, info, warn};
use unit_atlas_core::prelude::*;
use walkdir::WalkDir;

/// Suffix of the wreck model converted alongside each unit in batch mode.
const DEAD_SUFFIX: &str = "_dead";

#[derive(Parser, Debug)]
#[command(
    name = "unit-atlas",
    about = "Composite legacy unit textures into a palette atlas and emit mesh JSON with UVs",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one unit: atlas rasters, atlas metadata and unit JSON
    Convert(ConvertArgs),
    /// Convert every unit whose mesh name matches a glob, plus its wreck model
    Batch(BatchArgs),
    /// Rewrite an R,G,B,X palette file as B,G,R,X
    Palette(PaletteArgs),
}

#[derive(Parser, Debug, Clone)]
struct ConvertArgs {
    /// Unit name, e.g. ARMCOM or ARMCOM_dead
    #[arg(help_heading = "Input/Output")]
    unit: String,
    /// Write the unit JSON here instead of stdout
    #[arg(long, help_heading = "Input/Output")]
    json_out: Option<PathBuf>,
    #[command(flatten)]
    atlas: AtlasArgs,
}

#[derive(Parser, Debug, Clone)]
struct BatchArgs {
    /// Glob over unit names, e.g. "ARM*"
    #[arg(long, default_value = "*", help_heading = "Input/Output")]
    units: String,
    #[command(flatten)]
    atlas: AtlasArgs,
}

#[derive(Parser, Debug, Clone)]
struct PaletteArgs {
    /// Input palette file
    input: PathBuf,
    /// Output palette file
    output: PathBuf,
    /// Channel order of the input: rgbx | bgrx
    #[arg(long, default_value = "rgbx")]
    from: String,
    /// Channel order of the output: rgbx | bgrx
    #[arg(long, default_value = "bgrx")]
    to: String,
}

#[derive(Parser, Debug, Clone)]
struct AtlasArgs {
    // Input/Output
    /// Data directories searched in order (objects3d/, textures/, palettes/)
    #[arg(long = "data", required = true, num_args = 1.., help_heading = "Input/Output")]
    data_dirs: Vec<PathBuf>,
    /// Palette file (default: first <data>/palettes/PALETTE.PAL found)
    #[arg(long, help_heading = "Input/Output")]
    palette: Option<PathBuf>,
    /// Output directory
    #[arg(short, long, default_value = ".", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// YAML config file path (overrides atlas options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob) for archive files under <data>/textures
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob) for archive files under <data>/textures
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,

    // Atlas
    /// Smallest canvas width tried (power of two)
    #[arg(long, default_value_t = 64, help_heading = "Atlas")]
    min_width: u32,
    /// Largest canvas width tried (power of two)
    #[arg(long, default_value_t = 2048, help_heading = "Atlas")]
    max_width: u32,
    /// Also try canvases twice as tall as wide
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Atlas")]
    tall_variants: bool,
    /// Side of the swatch synthesized for colour-index faces
    #[arg(long, default_value_t = 4, help_heading = "Atlas")]
    swatch_size: u32,
    /// Saturation above which logo pixels become team colour
    #[arg(long, default_value_t = 0.333, help_heading = "Atlas")]
    logo_threshold: f32,
    /// Archive name fragment marking logo textures (case-insensitive)
    #[arg(long, default_value = "logos.gaf", help_heading = "Atlas")]
    logo_marker: String,
    /// Palette channel order on disk: bgrx | rgbx
    #[arg(long, default_value = "bgrx", help_heading = "Atlas")]
    channel_order: String,

    // Export
    /// Also write PNG versions of the albedo and team mask
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Export")]
    png: bool,
    /// Also write the atlas fragment table as JSON
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Export")]
    metadata: bool,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Convert(args) => run_convert(args),
        Commands::Batch(args) => run_batch(args, cli.progress && !cli.quiet),
        Commands::Palette(args) => run_palette(args),
    }
}

/// Everything a conversion needs besides the unit name.
struct Workspace {
    data_dirs: Vec<PathBuf>,
    cfg: AtlasConfig,
    palette: Palette,
    index: TextureIndex,
    png: bool,
    metadata: bool,
}

impl Workspace {
    /// Loads the palette before any archive is indexed so a bad palette fails fast.
    fn open(args: &AtlasArgs, cfg: AtlasConfig) -> anyhow::Result<Self> {
        let palette_path = match &args.palette {
            Some(p) => p.clone(),
            None => find_palette(&args.data_dirs).with_context(|| {
                format!(
                    "no palettes/PALETTE.PAL under {:?}; pass --palette",
                    args.data_dirs
                )
            })?,
        };
        let palette = Palette::load(&palette_path, cfg.channel_order)
            .with_context(|| format!("load palette {}", palette_path.display()))?;
        info!(path = %palette_path.display(), colours = palette.len(), "loaded palette");
        let index = build_texture_index(&args.data_dirs, &args.include, &args.exclude)?;
        info!(
            archives = index.num_archives(),
            textures = index.num_textures(),
            "indexed archives"
        );
        Ok(Self {
            data_dirs: args.data_dirs.clone(),
            cfg,
            palette,
            index,
            png: args.png,
            metadata: args.metadata,
        })
    }
}

fn run_convert(args: &ConvertArgs) -> anyhow::Result<()> {
    let cfg = build_config(&args.atlas)?;
    if args.atlas.print_config {
        return print_config(&cfg, &args.atlas.print_config_format);
    }
    fs::create_dir_all(&args.atlas.out_dir)
        .with_context(|| format!("create out_dir {}", args.atlas.out_dir.display()))?;
    let ws = Workspace::open(&args.atlas, cfg)?;
    let json = convert_unit(&ws, &args.unit, &args.atlas.out_dir)?;
    let text = serde_json::to_string_pretty(&json)?;
    match &args.json_out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "unit JSON written");
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn run_batch(args: &BatchArgs, show_progress: bool) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    let cfg = build_config(&args.atlas)?;
    if args.atlas.print_config {
        return print_config(&cfg, &args.atlas.print_config_format);
    }
    let units = discover_units(&args.atlas.data_dirs, &args.units)?;
    info!(count = units.len(), pattern = %args.units, "matched units");
    let ws = Workspace::open(&args.atlas, cfg)?;

    let bar = if show_progress {
        let b = ProgressBar::new(units.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} converting {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };

    let mut converted = 0usize;
    let mut failed = 0usize;
    for unit in &units {
        if let Some(b) = &bar {
            b.set_message(unit.clone());
        }
        let unit_dir = args.atlas.out_dir.join(unit);
        fs::create_dir_all(&unit_dir)
            .with_context(|| format!("create {}", unit_dir.display()))?;
        for suffix in ["", DEAD_SUFFIX] {
            let name = format!("{}{}", unit, suffix);
            if !suffix.is_empty() && find_unit_mesh(&ws.data_dirs, &name).is_none() {
                continue;
            }
            let result = convert_unit(&ws, &name, &unit_dir).and_then(|json| {
                let path = unit_dir.join(format!("{}.json", name));
                fs::write(&path, serde_json::to_string_pretty(&json)?)
                    .with_context(|| format!("write {}", path.display()))
            });
            match result {
                Ok(()) => converted += 1,
                Err(e) => {
                    let reason = format!("{:#}", e);
                    error!(unit = %name, error = %reason, "unable to convert model");
                    failed += 1;
                }
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    info!(converted, failed, "batch finished");
    Ok(())
}

fn run_palette(args: &PaletteArgs) -> anyhow::Result<()> {
    let from = parse_channel_order(&args.from)?;
    let to = parse_channel_order(&args.to)?;
    let palette = Palette::load(&args.input, from)
        .with_context(|| format!("load palette {}", args.input.display()))?;
    fs::write(&args.output, palette.to_bytes(to))
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        colours = palette.len(),
        "palette rewritten"
    );
    Ok(())
}

/// Builds one atlas per root object, writes its files to `out_dir` and returns the unit JSON.
fn convert_unit(ws: &Workspace, unit: &str, out_dir: &Path) -> anyhow::Result<serde_json::Value> {
    let mesh_path = find_unit_mesh(&ws.data_dirs, unit)
        .with_context(|| format!("no objects3d/{}.json under {:?}", unit, ws.data_dirs))?;
    let roots =
        load_unit(&mesh_path).with_context(|| format!("load mesh {}", mesh_path.display()))?;
    if roots.is_empty() {
        anyhow::bail!("mesh {} has no root objects", mesh_path.display());
    }

    let mut atlases = Vec::with_capacity(roots.len());
    for root in &roots {
        let atlas = build_unit_atlas(root, &ws.index, &ws.cfg)?.with_context(|| {
            format!(
                "textures of {} do not fit a {}x{} canvas",
                unit,
                ws.cfg.max_width,
                ws.cfg.max_width * 2
            )
        })?;
        info!(unit, object = %root.name, "{}", atlas.stats().summary());
        write_atlas_files(ws, unit, &atlas, out_dir)?;
        atlases.push(atlas);
    }
    Ok(unit_to_json(unit, roots.iter().zip(atlases.iter())))
}

fn write_atlas_files(
    ws: &Workspace,
    unit: &str,
    atlas: &CompositeAtlas,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let out = export_all(atlas, &ws.palette, ws.cfg.logo_saturation_threshold);
    let (w, h) = (atlas.width(), atlas.height());

    let albedo_path = out_dir.join(format!("{}_Albedo{}x{}.data", unit, w, h));
    fs::write(&albedo_path, &out.indexed)
        .with_context(|| format!("write {}", albedo_path.display()))?;
    let team_path = out_dir.join(format!("{}_SpecTeam{}x{}.data", unit, w, h));
    fs::write(&team_path, out.team_mask.as_raw())
        .with_context(|| format!("write {}", team_path.display()))?;

    if ws.png {
        let png_path = out_dir.join(format!("{}_Albedo{}x{}.png", unit, w, h));
        out.albedo
            .save(&png_path)
            .with_context(|| format!("write {}", png_path.display()))?;
        let png_path = out_dir.join(format!("{}_SpecTeam{}x{}.png", unit, w, h));
        out.team_mask
            .save(&png_path)
            .with_context(|| format!("write {}", png_path.display()))?;
    }
    if ws.metadata {
        let json_path = out_dir.join(format!("{}_atlas.json", unit));
        let json = serde_json::to_string_pretty(&to_json_hash(atlas))?;
        fs::write(&json_path, json).with_context(|| format!("write {}", json_path.display()))?;
    }
    info!(?albedo_path, ?team_path, "atlas written");
    Ok(())
}

fn build_config(args: &AtlasArgs) -> anyhow::Result<AtlasConfig> {
    let mut cfg = AtlasConfig::builder()
        .with_width_range(args.min_width, args.max_width)
        .tall_variants(args.tall_variants)
        .swatch_size(args.swatch_size)
        .logo_saturation_threshold(args.logo_threshold)
        .logo_archive_marker(args.logo_marker.clone())
        .channel_order(parse_channel_order(&args.channel_order)?)
        .build();
    if let Some(path) = &args.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg = y.into_atlas_config(cfg);
    }
    cfg.validate().context("invalid atlas configuration")?;
    Ok(cfg)
}

fn print_config(cfg: &AtlasConfig, format: &str) -> anyhow::Result<()> {
    match format {
        "yaml" => println!("{}", serde_yaml::to_string(cfg)?),
        _ => println!("{}", serde_json::to_string_pretty(cfg)?),
    }
    Ok(())
}

fn parse_channel_order(s: &str) -> anyhow::Result<ChannelOrder> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("unknown channel order: {} (expected bgrx or rgbx)", s))
}

fn find_palette(data_dirs: &[PathBuf]) -> Option<PathBuf> {
    data_dirs
        .iter()
        .map(|d| d.join("palettes").join("PALETTE.PAL"))
        .find(|p| p.is_file())
}

/// Mesh JSON of `unit` from the first data directory that has one.
fn find_unit_mesh(data_dirs: &[PathBuf], unit: &str) -> Option<PathBuf> {
    data_dirs
        .iter()
        .map(|d| d.join("objects3d").join(format!("{}.json", unit)))
        .find(|p| p.is_file())
}

/// Base unit names under `<data>/objects3d` matching `pattern`; wreck models are excluded.
fn discover_units(data_dirs: &[PathBuf], pattern: &str) -> anyhow::Result<BTreeSet<String>> {
    let matcher = Glob::new(pattern)
        .with_context(|| format!("bad unit pattern {}", pattern))?
        .compile_matcher();
    let mut units = BTreeSet::new();
    for dir in data_dirs {
        let objects = dir.join("objects3d");
        if !objects.is_dir() {
            warn!(dir = %objects.display(), "missing objects3d directory");
            continue;
        }
        for entry in WalkDir::new(&objects)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let p = entry.path();
            if !p.is_file() || !is_json(p) {
                continue;
            }
            let Some(stem) = p.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.ends_with(DEAD_SUFFIX) || !matcher.is_match(stem) {
                continue;
            }
            units.insert(stem.to_string());
        }
    }
    Ok(units)
}

/// Indexes every archive file under `<data>/textures`, data directories in the given order.
fn build_texture_index(
    data_dirs: &[PathBuf],
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<TextureIndex> {
    let mut index = TextureIndex::new();
    for dir in data_dirs {
        let textures = dir.join("textures");
        if !textures.is_dir() {
            warn!(dir = %textures.display(), "missing textures directory");
            continue;
        }
        for path in gather_paths(&textures, include, exclude)? {
            match MemoryArchive::load(&path) {
                Ok(archive) => index.push(Box::new(archive)),
                Err(e) => error!(?path, error = %e, "skip archive"),
            }
        }
    }
    Ok(index)
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_glob_set(include)?;
    let exc_set = build_glob_set(exclude)?;
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_json(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_json(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    Ok(list)
}

fn build_glob_set(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("bad glob {}", pat))?);
    }
    Ok(Some(b.build()?))
}

fn should_skip(p: &Path, include: Option<&GlobSet>, exclude: Option<&GlobSet>) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_json(p: &Path) -> bool {
    p.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    // Logs go to stderr; stdout carries the unit JSON.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    min_width: Option<u32>,
    max_width: Option<u32>,
    tall_variants: Option<bool>,
    swatch_size: Option<u32>,
    logo_saturation_threshold: Option<f32>,
    logo_archive_marker: Option<String>,
    channel_order: Option<String>,
}

impl YamlConfig {
    fn into_atlas_config(self, mut cfg: AtlasConfig) -> AtlasConfig {
        if let Some(v) = self.min_width {
            cfg.min_width = v;
        }
        if let Some(v) = self.max_width {
            cfg.max_width = v;
        }
        if let Some(v) = self.tall_variants {
            cfg.tall_variants = v;
        }
        if let Some(v) = self.swatch_size {
            cfg.swatch_size = v;
        }
        if let Some(v) = self.logo_saturation_threshold {
            cfg.logo_saturation_threshold = v;
        }
        if let Some(v) = self.logo_archive_marker {
            cfg.logo_archive_marker = v;
        }
        if let Some(v) = self.channel_order {
            cfg.channel_order = v.parse().unwrap_or(cfg.channel_order);
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const UNIT_MESH: &str = r#"[{
        "name": "base",
        "vertices": [{"x": 65536, "y": 0, "z": 0}],
        "primitives": [
            {"textureName": "armtex", "vertices": [0]},
            {"textureName": "teamlogo", "vertices": [0]},
            {"colorIndex": 3, "vertices": [0]}
        ],
        "children": []
    }]"#;

    fn write_archive(path: &Path, name: &str, entries: &[(&str, u32, u32, u8)]) {
        let mut archive = MemoryArchive::new(name);
        for &(entry, w, h, v) in entries {
            archive = archive.with_entry(entry, vec![ArchiveFrame::solid(w, h, v)]);
        }
        fs::write(path, serde_json::to_string(&archive).unwrap()).unwrap();
    }

    fn palette_bytes() -> Vec<u8> {
        // entry 1 saturated red, everything else mid grey; stored B,G,R,X
        let mut bytes = Vec::with_capacity(1024);
        for i in 0..256u32 {
            let (r, g, b) = if i == 1 { (200, 10, 10) } else { (90, 90, 90) };
            bytes.extend_from_slice(&[b, g, r, 0]);
        }
        bytes
    }

    fn data_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for sub in ["objects3d", "textures", "palettes"] {
            fs::create_dir_all(root.join(sub)).unwrap();
        }
        fs::write(root.join("objects3d/ARMCOM.json"), UNIT_MESH).unwrap();
        fs::write(root.join("objects3d/ARMCOM_dead.json"), UNIT_MESH).unwrap();
        fs::write(root.join("objects3d/CORAK.json"), r#"[{"name": "base"}]"#).unwrap();
        write_archive(
            &root.join("textures/armtex.json"),
            "armtex.gaf",
            &[("armtex", 16, 16, 2)],
        );
        write_archive(
            &root.join("textures/logos.json"),
            "LOGOS.GAF",
            &[("teamlogo", 8, 8, 1)],
        );
        fs::write(root.join("palettes/PALETTE.PAL"), palette_bytes()).unwrap();
        dir
    }

    fn atlas_args(data: &Path, out: &Path) -> AtlasArgs {
        let cli = Cli::parse_from([
            "unit-atlas",
            "convert",
            "ARMCOM",
            "--data",
            data.to_str().unwrap(),
            "--out-dir",
            out.to_str().unwrap(),
        ]);
        match cli.command {
            Commands::Convert(args) => args.atlas,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn convert_writes_rasters_and_unit_json() {
        let data = data_dir();
        let out = tempfile::tempdir().unwrap();
        let args = atlas_args(data.path(), out.path());
        let ws = Workspace::open(&args, build_config(&args).unwrap()).unwrap();
        assert_eq!(ws.index.num_textures(), 2);

        let json = convert_unit(&ws, "ARMCOM", out.path()).unwrap();
        let base = &json["ARMCOM"][0];
        assert_eq!(base["name"], "base");
        assert_eq!(base["vertices"][0]["x"], 1.0);
        assert_eq!(base["primitives"][2]["colorIndexTextureName"], "__colorIndex3");

        let albedo = fs::read(out.path().join("ARMCOM_Albedo64x64.data")).unwrap();
        assert_eq!(albedo.len(), 64 * 64);
        let team = fs::read(out.path().join("ARMCOM_SpecTeam64x64.data")).unwrap();
        assert_eq!(team.len(), 64 * 64 * 4);
        // logo texture (index 1, saturated) contributes non-zero team alpha
        assert!(team.chunks(4).any(|px| px[3] > 0));
        assert!(out.path().join("ARMCOM_Albedo64x64.png").is_file());
        assert!(out.path().join("ARMCOM_atlas.json").is_file());
    }

    #[test]
    fn missing_unit_is_an_error() {
        let data = data_dir();
        let out = tempfile::tempdir().unwrap();
        let args = atlas_args(data.path(), out.path());
        let ws = Workspace::open(&args, build_config(&args).unwrap()).unwrap();
        assert!(convert_unit(&ws, "NOPE", out.path()).is_err());
    }

    #[test]
    fn discover_skips_wreck_models() {
        let data = data_dir();
        let all = discover_units(&[data.path().to_path_buf()], "*").unwrap();
        assert_eq!(
            all.into_iter().collect::<Vec<_>>(),
            vec!["ARMCOM".to_string(), "CORAK".to_string()]
        );
        let arm = discover_units(&[data.path().to_path_buf()], "ARM*").unwrap();
        assert_eq!(arm.len(), 1);
    }

    #[test]
    fn palette_swaps_red_and_blue() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pal");
        let output = dir.path().join("out.pal");
        fs::write(&input, [1u8, 2, 3, 0, 4, 5, 6, 0]).unwrap();
        run_palette(&PaletteArgs {
            input,
            output: output.clone(),
            from: "rgbx".into(),
            to: "bgrx".into(),
        })
        .unwrap();
        assert_eq!(fs::read(output).unwrap(), vec![3u8, 2, 1, 0, 6, 5, 4, 0]);
    }

    #[test]
    fn yaml_overrides_cli_values() {
        let y: YamlConfig =
            serde_yaml::from_str("max_width: 512\ntall_variants: false\nchannel_order: rgbx\n")
                .unwrap();
        let cfg = y.into_atlas_config(AtlasConfig::default());
        assert_eq!(cfg.max_width, 512);
        assert!(!cfg.tall_variants);
        assert_eq!(cfg.channel_order, ChannelOrder::Rgbx);
        assert_eq!(cfg.min_width, 64);
    }

    #[test]
    fn include_exclude_filters() {
        let inc = build_glob_set(&["**/logos*".to_string()]).unwrap();
        let exc = build_glob_set(&["**/old/**".to_string()]).unwrap();
        assert!(!should_skip(
            Path::new("data/textures/logos.json"),
            inc.as_ref(),
            exc.as_ref()
        ));
        assert!(should_skip(
            Path::new("data/textures/armtex.json"),
            inc.as_ref(),
            exc.as_ref()
        ));
        assert!(should_skip(
            Path::new("data/old/logos.json"),
            inc.as_ref(),
            exc.as_ref()
        ));
    }
}
