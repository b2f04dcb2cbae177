use serde::Serialize;

use ssz_core::{
    ArrayUniformity, CorrectionGate, EntangledPairAnalysis, GrComparison, Heuristics,
    LinearScaling, PairMismatch, PhysicalConstants, Qubit, Regime, SegmentAnalysis,
    StabilityReport, TwoQubitTiming, ZoneAnalysis,
};

#[derive(Serialize)]
pub struct ConstantsReport {
    pub constants: PhysicalConstants,
    pub regime_cutover: f64,
    pub qubit_frequency_hz: f64,
    pub schwarzschild_radius: f64,
    pub surface_xi: f64,
    pub surface_time_dilation: f64,
    pub heuristics: Heuristics,
}

#[derive(Serialize)]
pub struct QubitReport {
    pub height: f64,
    pub regime: Regime,
    #[serde(flatten)]
    pub analysis: SegmentAnalysis,
    pub effective_t2: f64,
    pub decoherence_rate: f64,
}

#[derive(Serialize)]
pub struct PairReport {
    pub height_a: f64,
    pub height_b: f64,
    pub gates: u64,
    pub mismatch: PairMismatch,
    pub timing: TwoQubitTiming,
    pub entanglement: EntangledPairAnalysis,
    pub correction: Option<CorrectionGate>,
}

#[derive(Serialize)]
pub struct ArrayReport {
    pub qubits: Vec<Qubit>,
    pub uniformity: ArrayUniformity,
    pub code_distance: u32,
    pub physical_error_rate: f64,
    pub logical_error_rate: f64,
}

#[derive(Serialize)]
pub struct ConsistencyReport {
    pub gr: GrComparison,
    pub linear_scaling: LinearScaling,
    pub stability: StabilityReport,
}

impl ConstantsReport {
    pub fn print_text(&self) {
        let c = &self.constants;
        println!("reference mass:   {:.4e} kg", c.reference_mass);
        println!("reference radius: {:.4e} m", c.reference_radius);
        println!("r_s:              {:.3e} m", self.schwarzschild_radius);
        println!("Xi(surface):      {:.4e}", self.surface_xi);
        println!("D(surface):       {:.15}", self.surface_time_dilation);
        println!("regime cutover:   r/r_s > {}", self.regime_cutover);
        println!("qubit frequency:  {:.3e} Hz", self.qubit_frequency_hz);
    }
}

impl QubitReport {
    pub fn print_text(&self) {
        let a = &self.analysis;
        println!("height:           {} m", self.height);
        println!("regime:           {}", self.regime);
        println!("Xi:               {:.6e}", a.xi);
        println!("D:                {:.15}", a.time_dilation);
        println!("dXi/dr:           {:.4e} 1/m", a.segment_gradient);
        println!("coherence factor: {:.12}", a.coherence_factor);
        println!("effective T2:     {:.6e} s", self.effective_t2);
        println!("decoherence rate: {:.6e} 1/s", self.decoherence_rate);
    }
}

impl PairReport {
    pub fn print_text(&self) {
        let m = &self.mismatch;
        let e = &self.entanglement;
        println!("heights:          {} m / {} m", self.height_a, self.height_b);
        println!("delta Xi:         {:.4e}", m.delta_xi);
        println!("delta D:          {:.4e}", m.delta_time_dilation);
        println!("phase drift:      {:.4e} rad/gate", m.phase_drift_per_gate);
        println!("phase drift:      {:.4e} rad/s", e.phase_drift_per_second);
        println!("timing asymmetry: {:.4e}", self.timing.timing_asymmetry);
        println!("optimal gate:     {:.6e} s", self.timing.optimal_gate_time);
        match e.characteristic_time {
            Some(t) => println!("T_ssz:            {t:.4e} s ({:.2} days)", t / 86_400.0),
            None => println!("T_ssz:            unbounded (no drift)"),
        }
        println!("after {} gates:", self.gates);
        println!("  Bell fidelity:  {:.15}", e.fidelity_after_n_gates);
        println!("  CHSH S:         {:.12}", e.chsh_parameter);
        if let Some(gate) = &self.correction {
            println!("  correction:     {gate}");
        }
        println!("coherent zone:    {}", if e.in_coherent_zone { "yes" } else { "no" });
    }
}

pub fn print_zone_text(z: &ZoneAnalysis) {
    println!("epsilon:          {:.3e}", z.epsilon);
    println!("zone:             [{:.6e}, {:.6e}] m", z.zone.h_min, z.zone.h_max);
    println!("zone width:       {:.4} mm", z.zone_width * 1e3);
    println!("formula 4eR^2/rs: {:.4} mm", z.formula_value * 1e3);
    println!("formula matches:  {}", z.formula_matches);
    println!("max phase drift:  {:.4e} rad/gate", z.max_phase_drift);
}

impl ArrayReport {
    pub fn print_text(&self) {
        for q in &self.qubits {
            println!("{}  x={:+.4e}  y={:+.4e}  z={}", q.id, q.x, q.y, q.z);
        }
        let u = &self.uniformity;
        println!("Xi mean:          {:.6e}", u.xi_mean);
        println!("Xi std:           {:.4e}", u.xi_std);
        println!("Xi range:         {:.4e}", u.xi_range);
        println!("uniformity:       {:.12}", u.uniformity);
        println!(
            "logical error:    {:.4e} (d={}, p={})",
            self.logical_error_rate, self.code_distance, self.physical_error_rate
        );
    }
}

impl ConsistencyReport {
    pub fn print_text(&self) {
        println!("GR comparison at reference surface:");
        println!("  D_ssz:          {:.15}", self.gr.d_ssz);
        println!("  D_gr:           {:.15}", self.gr.d_gr);
        println!("  relative diff:  {:.3e}", self.gr.relative_difference);
        println!("  weak field:     {}", self.gr.is_weak_field);

        let l = &self.linear_scaling;
        println!("linear scaling:");
        println!("  linear:         {}", l.is_linear);
        println!("  max deviation:  {:.3e}", l.max_deviation);
        println!("  drift per mm:   {:.4e} rad/gate", l.scaling_constant_per_mm);

        let s = &self.stability;
        println!("numerical stability:");
        for ((h, closed), direct) in s.heights.iter().zip(&s.closed_form_values).zip(&s.direct_values) {
            println!("  dh={h:<8e} closed={closed:+.6e} direct={direct:+.6e}");
        }
        println!("  demonstrated:   {}", s.numerical_stability_demonstrated);
    }
}
