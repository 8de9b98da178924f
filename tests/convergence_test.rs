//! Convergence of the hat manufactured solution under mesh refinement.
//!
//! The hat ψ = 1 − r/R has a kink at the center and at r = R, so the rate is
//! low, but the error must drop as the mesh is refined.

use sn_rs::{
    CrossSections, HatProblem, OrientedMesh, PsiBound, PsiData, Quadrature, SweepConfig,
    SweepSchedule, SweepSource, TetMesh, source_iteration, sweep,
};

/// Single sweep of the hat problem without scattering; returns the L2 error.
fn run_hat_sweep(n: usize, sigma_t: f64) -> f64 {
    let hat = HatProblem::default();
    let mesh = TetMesh::cube(hat.cube_size, n).unwrap();
    let quad = Quadrature::s2();
    let geom = OrientedMesh::new(&mesh, &quad);
    let xs = CrossSections::uniform(mesh.n_cells(), sigma_t, 0.0);

    let fixed = hat.fixed_source(&mesh, &quad, &xs, 1).unwrap();
    let schedule = SweepSchedule::new(&geom).unwrap();
    let bound = PsiBound::new(0, quad.n_angles(), 1);
    let mut psi = PsiData::new(quad.n_angles(), mesh.n_cells(), 1);

    let ctx = SweepConfig::default().context(&geom);
    sweep(
        &ctx,
        &schedule,
        &xs.sigma_t,
        &SweepSource::fixed(&fixed),
        &bound,
        &mut psi,
    )
    .unwrap();

    hat.l2_error(&mesh, &psi).unwrap()
}

/// Source iteration with isotropic scattering; returns (L2 error, iterations).
fn run_hat_scattering(n: usize, sigma_t: f64, sigma_s: f64) -> (f64, usize) {
    let hat = HatProblem::default();
    let mesh = TetMesh::cube(hat.cube_size, n).unwrap();
    let quad = Quadrature::s2();
    let geom = OrientedMesh::new(&mesh, &quad);
    let xs = CrossSections::uniform(mesh.n_cells(), sigma_t, sigma_s);

    let fixed = hat.fixed_source(&mesh, &quad, &xs, 1).unwrap();
    let schedule = SweepSchedule::new(&geom).unwrap();
    let bound = PsiBound::new(0, quad.n_angles(), 1);
    let mut psi = PsiData::new(quad.n_angles(), mesh.n_cells(), 1);

    let config = SweepConfig::default()
        .with_tolerance(1e-8)
        .with_max_iterations(200);
    let outcome = source_iteration(
        &config, &geom, &quad, &schedule, &xs, &fixed, &bound, &mut psi,
    )
    .unwrap();
    assert!(outcome.converged, "source iteration did not converge for n={n}");

    (hat.l2_error(&mesh, &psi).unwrap(), outcome.iterations)
}

#[test]
fn test_hat_error_decreases_with_refinement() {
    let resolutions = [4, 8];
    for sigma_t in [1.0, 0.1] {
        let errors: Vec<f64> = resolutions
            .iter()
            .map(|&n| run_hat_sweep(n, sigma_t))
            .collect();

        println!("Hat problem, sigma_t = {sigma_t}:");
        for (i, (&n, &err)) in resolutions.iter().zip(errors.iter()).enumerate() {
            if i > 0 {
                let ratio = errors[i - 1] / err;
                println!(
                    "  n={:3}: error={:.4e}, ratio={:.2}, order={:.2}",
                    n,
                    err,
                    ratio,
                    ratio.log2()
                );
            } else {
                println!("  n={:3}: error={:.4e}", n, err);
            }
        }

        for &err in &errors {
            assert!(err.is_finite() && err >= 0.0, "bad error {err}");
        }
        assert!(
            errors[1] < errors[0],
            "error should decrease: {:.4e} -> {:.4e}",
            errors[0],
            errors[1]
        );
    }
}

#[test]
fn test_hat_with_scattering_converges() {
    let (err_coarse, it_coarse) = run_hat_scattering(4, 1.0, 0.5);
    let (err_fine, it_fine) = run_hat_scattering(8, 1.0, 0.5);
    println!("Hat problem with scattering (sigma_s / sigma_t = 0.5):");
    println!("  n=  4: error={err_coarse:.4e}, iterations={it_coarse}");
    println!("  n=  8: error={err_fine:.4e}, iterations={it_fine}");

    assert!(err_coarse.is_finite() && err_fine.is_finite());
    assert!(err_fine < err_coarse);
    assert!(it_coarse > 2);
}

#[test]
fn test_hat_error_matches_between_solvers() {
    use sn_rs::DenseSolveStrategy;

    let hat = HatProblem::default();
    let mesh = TetMesh::cube(hat.cube_size, 4).unwrap();
    let quad = Quadrature::s2();
    let geom = OrientedMesh::new(&mesh, &quad);
    let xs = CrossSections::uniform(mesh.n_cells(), 1.0, 0.0);
    let fixed = hat.fixed_source(&mesh, &quad, &xs, 1).unwrap();
    let schedule = SweepSchedule::new(&geom).unwrap();
    let bound = PsiBound::new(0, quad.n_angles(), 1);

    let errors: Vec<f64> = DenseSolveStrategy::ALL
        .iter()
        .map(|&solver| {
            let ctx = SweepConfig::default()
                .with_solver(solver)
                .with_checked(true)
                .context(&geom);
            let mut psi = PsiData::new(quad.n_angles(), mesh.n_cells(), 1);
            sweep(&ctx, &schedule, &xs.sigma_t, &SweepSource::fixed(&fixed), &bound, &mut psi)
                .unwrap();
            hat.l2_error(&mesh, &psi).unwrap()
        })
        .collect();

    for err in &errors[1..] {
        assert!((err - errors[0]).abs() < 1e-10 * errors[0]);
    }
}
