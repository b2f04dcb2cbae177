mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use ssz_core::{
    DEFAULT_LINEARITY_HEIGHTS, DEFAULT_STABILITY_HEIGHTS, PairMember, Qubit, QubitPair, Regime,
    SszConfig, SszModel, correction_gate, optimize_qubit_array,
};

use report::{ArrayReport, ConsistencyReport, ConstantsReport, PairReport, QubitReport};

#[derive(Parser)]
#[command(name = "ssz", about = "Segmented-spacetime time-dilation model for qubit arrays")]
struct Cli {
    /// TOML model configuration (falls back to $SSZ_CONFIG, then built-in Earth defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the active constants and derived surface values
    Constants,

    /// Segment analysis of a single qubit
    Qubit {
        /// Height above the reference surface [m]
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        height: f64,
    },

    /// Mismatch, gate timing and entanglement drift of a vertical pair
    Pair {
        /// Height of qubit A [m]
        #[arg(long, allow_negative_numbers = true)]
        height_a: f64,

        /// Height of qubit B [m]
        #[arg(long, allow_negative_numbers = true)]
        height_b: f64,

        /// Gate count for accumulated fidelity and CHSH
        #[arg(long, default_value_t = 1)]
        gates: u64,

        /// Ξ tolerance for the coherent-zone check
        #[arg(long, default_value_t = 1e-18)]
        tolerance: f64,
    },

    /// Segment-coherent zone around a height
    Zone {
        /// Centre height [m]
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        center: f64,

        /// Maximum Ξ variation inside the zone
        #[arg(long, default_value_t = 1e-18)]
        epsilon: f64,
    },

    /// Lay out a square qubit array and report its uniformity
    Array {
        /// Number of qubits
        #[arg(long, default_value_t = 9)]
        count: usize,

        /// Common height [m]
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        height: f64,

        /// Grid pitch [m]
        #[arg(long, default_value_t = 1e-3)]
        spacing: f64,

        /// Surface-code distance
        #[arg(long, default_value_t = 3)]
        distance: u32,

        /// Physical error rate per qubit
        #[arg(long, default_value_t = 1e-3)]
        error_rate: f64,
    },

    /// GR agreement, linear drift scaling and closed-form stability checks
    Stability,
}

fn load_model(cli: &Cli) -> Result<SszModel> {
    let path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os("SSZ_CONFIG").map(PathBuf::from));
    let Some(path) = path else {
        tracing::debug!("no config given, using Earth defaults");
        return Ok(SszModel::earth());
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = SszConfig::from_toml_str(&text)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    SszModel::new(config).context("failed to build model")
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let model = load_model(&cli)?;

    match &cli.command {
        Commands::Constants => cmd_constants(&cli, &model),
        Commands::Qubit { height } => cmd_qubit(&cli, &model, *height),
        Commands::Pair {
            height_a,
            height_b,
            gates,
            tolerance,
        } => cmd_pair(&cli, &model, *height_a, *height_b, *gates, *tolerance),
        Commands::Zone { center, epsilon } => cmd_zone(&cli, &model, *center, *epsilon),
        Commands::Array {
            count,
            height,
            spacing,
            distance,
            error_rate,
        } => cmd_array(&cli, &model, *count, *height, *spacing, *distance, *error_rate),
        Commands::Stability => cmd_stability(&cli, &model),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn cmd_constants(cli: &Cli, model: &SszModel) -> Result<()> {
    let mass = model.reference_mass();
    let r = model.reference_radius();
    let report = ConstantsReport {
        constants: *model.constants(),
        regime_cutover: model.config().regime_cutover,
        qubit_frequency_hz: model.config().qubit_frequency_hz,
        schwarzschild_radius: model.schwarzschild_radius(mass),
        surface_xi: model.segment_density_auto(r, mass)?,
        surface_time_dilation: model.time_dilation(r, mass)?,
        heuristics: *model.heuristics(),
    };
    if cli.json {
        return print_json(&report);
    }
    report.print_text();
    Ok(())
}

fn cmd_qubit(cli: &Cli, model: &SszModel, height: f64) -> Result<()> {
    let mass = model.reference_mass();
    let qubit = Qubit::at_height("Q0", height);
    let report = QubitReport {
        height,
        regime: model.select_regime(model.radius_at_height(height), mass)?,
        analysis: model
            .analyze_qubit_segment(&qubit, mass)
            .context("failed to analyze qubit")?,
        effective_t2: model.effective_t2(&qubit, mass)?,
        decoherence_rate: model.ssz_decoherence_rate(&qubit, true, mass)?,
    };
    if cli.json {
        return print_json(&report);
    }
    report.print_text();
    Ok(())
}

fn cmd_pair(
    cli: &Cli,
    model: &SszModel,
    height_a: f64,
    height_b: f64,
    gates: u64,
    tolerance: f64,
) -> Result<()> {
    let mass = model.reference_mass();
    let a = Qubit::at_height("A", height_a);
    let b = Qubit::at_height("B", height_b);
    let pair = QubitPair::new(&a, &b);

    let mismatch = model
        .pair_segment_mismatch(&pair, mass)
        .context("failed to compute pair mismatch")?;
    let timing = model.two_qubit_gate_timing(&pair, mass)?;
    let entanglement = model
        .analyze_entangled_pair(&pair, gates, tolerance, mass)
        .context("failed to analyze entangled pair")?;

    let accumulated = gates as f64 * entanglement.phase_drift_per_gate;
    let correction = (accumulated > 0.0).then(|| {
        let higher = if height_a > height_b {
            PairMember::A
        } else {
            PairMember::B
        };
        correction_gate(accumulated, higher)
    });

    let report = PairReport {
        height_a,
        height_b,
        gates,
        mismatch,
        timing,
        entanglement,
        correction,
    };
    if cli.json {
        return print_json(&report);
    }
    report.print_text();
    Ok(())
}

fn cmd_zone(cli: &Cli, model: &SszModel, center: f64, epsilon: f64) -> Result<()> {
    let analysis = model
        .coherent_zone_analysis(epsilon, center, model.reference_mass())
        .context("failed to compute coherent zone")?;
    if cli.json {
        return print_json(&analysis);
    }
    report::print_zone_text(&analysis);
    Ok(())
}

fn cmd_array(
    cli: &Cli,
    model: &SszModel,
    count: usize,
    height: f64,
    spacing: f64,
    distance: u32,
    error_rate: f64,
) -> Result<()> {
    let mass = model.reference_mass();
    let per_side = (count as f64).sqrt().ceil();
    let qubits = optimize_qubit_array(count, height, spacing * per_side)?;
    let uniformity = model
        .array_segment_uniformity(&qubits, mass, Regime::Weak)
        .context("failed to compute array uniformity")?;
    let logical_error_rate =
        model.logical_error_rate(&qubits, distance, error_rate, mass, Regime::Weak)?;

    let report = ArrayReport {
        qubits,
        uniformity,
        code_distance: distance,
        physical_error_rate: error_rate,
        logical_error_rate,
    };
    if cli.json {
        return print_json(&report);
    }
    report.print_text();
    Ok(())
}

fn cmd_stability(cli: &Cli, model: &SszModel) -> Result<()> {
    let report = ConsistencyReport {
        gr: model.compare_with_gr(model.reference_radius(), model.reference_mass())?,
        linear_scaling: model.verify_linear_scaling(&DEFAULT_LINEARITY_HEIGHTS, 1e-3)?,
        stability: model.verify_numerical_stability(&DEFAULT_STABILITY_HEIGHTS)?,
    };
    if cli.json {
        return print_json(&report);
    }
    report.print_text();
    Ok(())
}
