//! Crumb CLI - build a base shape, subdivide it, inspect the result.
//!
//! Usage: crumb <COMMAND> [OPTIONS]
//!
//! Run `crumb --help` for available commands. Set `RUST_LOG=info` (or
//! `trace` for per-face detail) to see subdivision logs.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use crumb::algo::subdivide::{catmull_clark_subdivide_with_progress, SubdivideOptions};
use crumb::algo::Progress;
use crumb::io;
use crumb::mesh::{build_base_mesh, BaseShape, DegeneratePolicy, PolyMesh};

#[derive(Parser)]
#[command(name = "crumb")]
#[command(author, version, about = "Catmull-Clark subdivision CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Base shape
        #[arg(short, long, value_enum, default_value = "cube")]
        shape: ShapeArg,

        /// Number of subdivision levels to apply first
        #[arg(short, long, default_value = "0")]
        levels: usize,
    },

    /// Subdivide a base shape
    Subdivide {
        /// Base shape
        #[arg(short, long, value_enum, default_value = "cube")]
        shape: ShapeArg,

        /// Number of subdivision levels
        #[arg(short, long, default_value = "1")]
        levels: usize,

        /// Output mesh file (.obj)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,

        /// Store zero normals instead of failing on degenerate geometry
        #[arg(long)]
        skip_degenerate: bool,
    },

    /// Print the flattened render buffers
    Buffers {
        /// Base shape
        #[arg(short, long, value_enum, default_value = "cube")]
        shape: ShapeArg,

        /// Number of subdivision levels to apply first
        #[arg(short, long, default_value = "0")]
        levels: usize,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ShapeArg {
    /// Cube with corners at (±1, ±1, ±1)
    Cube,
    /// Square torus
    Donut,
    /// Tetrahedron
    Tetrahedron,
}

impl From<ShapeArg> for BaseShape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Cube => BaseShape::Cube,
            ShapeArg::Donut => BaseShape::Donut,
            ShapeArg::Tetrahedron => BaseShape::Tetrahedron,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { shape, levels } => {
            let mesh = refined_shape(shape.into(), SubdivideOptions::new(levels))?;
            cmd_info(shape.into(), levels, &mesh);
        }
        Commands::Subdivide {
            shape,
            levels,
            output,
            sequential,
            skip_degenerate,
        } => {
            cmd_subdivide(shape.into(), levels, output, sequential, skip_degenerate)?;
        }
        Commands::Buffers { shape, levels } => {
            let mesh = refined_shape(shape.into(), SubdivideOptions::new(levels))?;
            cmd_buffers(&mesh)?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total, message| {
        if total == 0 {
            return;
        }

        let raw_percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Monotonic: never redraw a lower percentage.
        let previous = max_percent.fetch_max(raw_percent, Ordering::Relaxed);
        if raw_percent <= previous && raw_percent != 100 {
            return;
        }

        let bar_width = 30;
        let filled = (raw_percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {}", bar, space, raw_percent, message);
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn refined_shape(
    shape: BaseShape,
    options: SubdivideOptions,
) -> Result<PolyMesh, Box<dyn std::error::Error>> {
    let mut mesh: PolyMesh = build_base_mesh(shape)?;
    catmull_clark_subdivide_with_progress(&mut mesh, &options, &Progress::none())?;
    Ok(mesh)
}

fn cmd_info(shape: BaseShape, levels: usize, mesh: &PolyMesh) {
    println!("Shape: {} ({} levels)", shape, levels);
    println!("Vertices: {}", mesh.num_vertices());
    println!("Edges: {}", mesh.num_edges());
    println!("Faces: {}", mesh.num_faces());
    println!("Euler characteristic: {}", mesh.euler_characteristic());

    if mesh.is_uniform(3) {
        println!("Mesh type: Triangle mesh");
    } else if mesh.is_uniform(4) {
        println!("Mesh type: Quad mesh");
    } else {
        println!("Mesh type: Mixed polygon mesh");
    }

    let hole_edges = mesh.edge_ids().filter(|&e| mesh.is_hole_edge(e)).count();
    if mesh.is_closed() {
        println!("Topology: Closed (no holes)");
    } else if mesh.is_manifold() {
        println!("Topology: Open ({} hole edges)", hole_edges);
    } else {
        println!("Topology: Non-manifold");
    }

    let max_valence = mesh.vertex_ids().map(|v| mesh.valence(v)).max().unwrap_or(0);
    println!("Max valence: {}", max_valence);

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }
}

fn cmd_subdivide(
    shape: BaseShape,
    levels: usize,
    output: Option<PathBuf>,
    sequential: bool,
    skip_degenerate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh: PolyMesh = build_base_mesh(shape)?;
    println!(
        "Base {}: {} vertices, {} faces",
        shape,
        mesh.num_vertices(),
        mesh.num_faces()
    );

    let policy = if skip_degenerate {
        DegeneratePolicy::Skip
    } else {
        DegeneratePolicy::Abort
    };
    let options = SubdivideOptions::new(levels)
        .with_parallel(!sequential)
        .with_degenerate_policy(policy);
    let mode = if sequential { "sequential" } else { "parallel" };

    println!("Applying Catmull-Clark subdivision ({} levels, {})...", levels, mode);
    let progress = create_progress();
    let start = Instant::now();
    catmull_clark_subdivide_with_progress(&mut mesh, &options, &progress)?;
    let elapsed = start.elapsed();

    println!(
        "Result: {} vertices, {} faces ({:.2?})",
        mesh.num_vertices(),
        mesh.num_faces(),
        elapsed
    );

    if let Some(output) = output {
        io::save(&mesh, &output)?;
        println!("Saved: {}", output.display());
    }

    Ok(())
}

fn cmd_buffers(mesh: &PolyMesh) -> Result<(), Box<dyn std::error::Error>> {
    let buffers = match mesh.render_buffers() {
        Some(buffers) => buffers.clone(),
        None => crumb::mesh::flatten(mesh)?,
    };

    println!(
        "# {} vertices ({} bytes), {} triangles ({} bytes)",
        buffers.vertex_count(),
        buffers.vertex_bytes().len(),
        buffers.triangle_count(),
        buffers.index_bytes().len()
    );
    for r in buffers.records() {
        println!(
            "v {:.6} {:.6} {:.6}  n {:.6} {:.6} {:.6}",
            r.position[0], r.position[1], r.position[2], r.normal[0], r.normal[1], r.normal[2]
        );
    }
    for tri in buffers.indices.chunks_exact(3) {
        println!("t {} {} {}", tri[0], tri[1], tri[2]);
    }

    Ok(())
}
