use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pixeloom::{
    AtlasCell, Animation, BlitMethod, CpuSink, CpuSinkOpts, FrameDriven, LayoutRect, Orientation,
    Palette, PixelFormat, ProgressBar, RemapTable, RenderSink, Scene, SubRect, Surface,
    ThemeRegistry, Ticks, Widget, drive_frame, sub_blit,
};

#[derive(Parser, Debug)]
#[command(name = "pixeloom", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a raw palette-indexed image to PNG.
    Convert(ConvertArgs),
    /// Render frames of a progress bar scene as PNGs.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Raw index bytes, one per pixel, row-major.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Image width.
    #[arg(long)]
    width: u32,

    /// Image height.
    #[arg(long)]
    height: u32,

    /// 768-byte RGB palette.
    #[arg(long)]
    palette: PathBuf,

    /// Palette components are 6-bit VGA values (0..=63).
    #[arg(long, default_value_t = false)]
    vga: bool,

    /// Optional stencil bytes (0 = transparent), one per pixel.
    #[arg(long)]
    stencil: Option<PathBuf>,

    /// Optional 256-byte remap table applied before the palette lookup.
    #[arg(long)]
    remap: Option<PathBuf>,

    /// Palette offset added to every index (wraps at 256).
    #[arg(long, default_value_t = 0)]
    offset: u8,

    /// Mirror the image left-right.
    #[arg(long, default_value_t = false)]
    mirror: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames to render.
    #[arg(long, default_value_t = 8)]
    frames: u32,

    /// Progress bar theme.
    #[arg(long, default_value = "health")]
    theme: String,

    /// Frame width.
    #[arg(long, default_value_t = 160)]
    width: u32,

    /// Frame height.
    #[arg(long, default_value_t = 48)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn read(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read '{}'", path.display()))
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let index = read(&args.in_path)?;
    let stencil = args.stencil.as_deref().map(read).transpose()?;
    let rgb = read(&args.palette)?;
    let palette = if args.vga {
        Palette::from_vga_6bit(&rgb)
    } else {
        Palette::from_rgb_bytes(&rgb)
    };
    let palette =
        palette.with_context(|| format!("load palette '{}'", args.palette.display()))?;
    let remap = args
        .remap
        .as_deref()
        .map(|p| -> anyhow::Result<RemapTable> {
            Ok(RemapTable::from_slice(&read(p)?)
                .with_context(|| format!("load remap table '{}'", p.display()))?)
        })
        .transpose()?;

    let surface = Surface::from_indexed(args.width, args.height, &index, stencil.as_deref())?;
    let rgba = surface.to_rgba_vec(&palette, remap.as_ref(), args.offset)?;
    let mut out = Surface::from_data(PixelFormat::Rgba, args.width, args.height, &rgba)?;
    if args.mirror {
        let mut mirrored = Surface::new(PixelFormat::Rgba, args.width, args.height)?;
        let rect = SubRect {
            width: args.width,
            height: args.height,
            ..SubRect::default()
        };
        sub_blit(&mut mirrored, &out, rect, BlitMethod::Mirror)?;
        out = mirrored;
    }

    create_parent(&args.out)?;
    out.to_image()?.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Scene plus a progress bar that fills up and flashes once full.
struct Demo {
    scene: Scene,
    bar: ProgressBar,
    frame: u32,
    frames: u32,
}

impl FrameDriven for Demo {
    fn tick(&mut self, delta: Ticks) -> pixeloom::PixeloomResult<()> {
        self.scene.tick(delta)?;
        self.frame += 1;
        let pct = i64::from(self.frame) * 100 / i64::from(self.frames.max(1));
        self.bar.set_progress(i32::try_from(pct).unwrap_or(100));
        if self.bar.progress() == 100 {
            self.bar.set_flashing(true, 1);
        }
        self.bar.tick();
        Ok(())
    }

    fn render(&mut self, delta: Ticks, sink: &mut dyn RenderSink) -> pixeloom::PixeloomResult<()> {
        self.scene.render(delta, sink)?;
        self.bar.render(sink)
    }
}

fn gradient_background(w: u32, h: u32) -> anyhow::Result<Surface> {
    let index: Vec<u8> = (0..h)
        .flat_map(|y| (0..w).map(move |x| ((x + y) % 256) as u8))
        .collect();
    Ok(Surface::from_indexed(w, h, &index, None)?)
}

fn spinner(w: u32) -> anyhow::Result<Animation> {
    // Two 8x8 cells side by side; the second one is the mirrored first.
    let size = 8u32;
    let mut index = vec![0u8; (size * 2 * size) as usize];
    let mut stencil = vec![0u8; index.len()];
    for y in 0..size {
        for x in 0..y.max(1) {
            let i = (y * size * 2 + x) as usize;
            index[i] = 255;
            stencil[i] = 1;
        }
    }
    let atlas = Surface::from_indexed(size * 2, size, &index, Some(&stencil))?;
    let cell = |mirror| AtlasCell {
        width: size,
        height: size,
        offset_x: i32::try_from(w / 2).unwrap_or(0) - 4,
        offset_y: 4,
        duration: 2,
        mirror,
        ..AtlasCell::default()
    };
    Ok(Animation::from_atlas(&atlas, &[cell(false), cell(true)])?.with_load_on_start(true))
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let themes = ThemeRegistry::builtin()?;
    let theme = themes.get(&args.theme)?.clone();

    let scene = Scene::load(
        gradient_background(args.width, args.height)?,
        vec![spinner(args.width)?],
    );
    let mut bar = ProgressBar::new(theme, Orientation::Left, 0);
    bar.layout(LayoutRect {
        x: 8,
        y: i32::try_from(args.height.saturating_sub(16)).unwrap_or(0),
        w: args.width.saturating_sub(16),
        h: 8,
    })?;
    let mut demo = Demo {
        scene,
        bar,
        frame: 0,
        frames: args.frames,
    };

    let mut sink = CpuSink::new(CpuSinkOpts {
        width: args.width,
        height: args.height,
        ..CpuSinkOpts::from_env()
    })?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for n in 0..args.frames {
        sink.begin_frame();
        sink.set_palette_offset((n % 256) as u8);
        drive_frame(&mut demo, Ticks(1), &mut sink)?;
        let path = args.out_dir.join(format!("frame_{n:04}.png"));
        sink.frame().to_image()?.save_png(&path)?;
    }

    let stats = sink.stats();
    eprintln!(
        "wrote {} frames to {} (uploads: {} hits, {} misses, {} uncached)",
        args.frames,
        args.out_dir.display(),
        stats.hits,
        stats.misses,
        stats.uncached
    );
    Ok(())
}
