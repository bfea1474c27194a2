use approx::assert_relative_eq;
use portfolio_projection::projection::MONTHS_PER_YEAR;
use portfolio_projection::report::{format_summary, format_year_line};
use portfolio_projection::returns::load_series_from_reader;
use portfolio_projection::{
    AnnualReturnSeries, MonthlyFactorSet, PortfolioSimulator, ProjectionError, SimulationConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn single_year_config() -> SimulationConfig {
    SimulationConfig {
        monthly_contribution: 10_000.0,
        annual_bonus: 0.0,
        stock_ratio: 1.0,
        years: 1,
        ..Default::default()
    }
}

#[test]
fn test_single_year_all_stock_matches_direct_recomputation() {
    let series = load_series_from_reader("Rate\n10.0\n".as_bytes()).unwrap();
    let simulator = PortfolioSimulator::new(series, single_year_config()).unwrap();
    let result = simulator.simulate(&mut StdRng::seed_from_u64(2024)).unwrap();

    assert_eq!(result.months.len(), MONTHS_PER_YEAR);
    let factors: Vec<f64> = result.months.iter().map(|m| m.stock_factor).collect();
    let product: f64 = factors.iter().product();
    assert!((product - 1.10).abs() <= 1e-9, "factor product {}", product);

    let mut expected_stock = 0.0;
    for f in &factors {
        expected_stock = (expected_stock + 10_000.0) * f;
    }

    let summary = result.summary();
    assert_relative_eq!(summary.final_stock_balance, expected_stock, max_relative = 1e-12);
    assert_eq!(summary.final_bond_balance, 0.0);
    assert_relative_eq!(summary.total_contributed, 120_000.0);
    assert_relative_eq!(
        summary.total_roi * 100.0,
        (expected_stock / 120_000.0 - 1.0) * 100.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(summary.stock_cumulative_return, 0.10, epsilon = 1e-9);
}

#[test]
fn test_fixed_seed_reproduces_report() {
    let series = AnnualReturnSeries::from_percentages(&[31.49, 18.40, 28.71, -18.11]).unwrap();
    let config = SimulationConfig {
        stock_ratio: 0.7,
        years: 10,
        ..Default::default()
    };
    let simulator = PortfolioSimulator::new(series, config).unwrap();

    let render = |seed: u64| {
        let result = simulator.simulate(&mut StdRng::seed_from_u64(seed)).unwrap();
        let mut text: Vec<String> = result.years.iter().map(format_year_line).collect();
        text.push(format_summary(&result.summary(), simulator.config()));
        (result, text.join("\n"))
    };

    let (first, first_text) = render(17);
    let (second, second_text) = render(17);
    assert_eq!(first, second);
    assert_eq!(first_text, second_text);

    let (_, other_text) = render(18);
    assert_ne!(first_text, other_text);
}

#[test]
fn test_more_stock_increases_property_on_fixed_path() {
    let series = AnnualReturnSeries::new(vec![0.42]).unwrap();
    let path = vec![MonthlyFactorSet::constant(0.03); 5];

    let finals: Vec<f64> = [0.0, 0.25, 0.5, 0.75, 1.0]
        .iter()
        .map(|&stock_ratio| {
            let config = SimulationConfig {
                stock_ratio,
                years: 5,
                bond_annual_rate: 0.02,
                ..Default::default()
            };
            let simulator = PortfolioSimulator::new(series.clone(), config).unwrap();
            simulator.simulate_path(&path).unwrap().summary().final_property
        })
        .collect();

    for pair in finals.windows(2) {
        assert!(pair[1] > pair[0], "{:?}", finals);
    }
}

#[test]
fn test_horizon_wraps_series() {
    let series = AnnualReturnSeries::from_percentages(&[10.0, -5.0]).unwrap();
    let config = SimulationConfig {
        years: 5,
        ..Default::default()
    };
    let simulator = PortfolioSimulator::new(series, config).unwrap();
    let result = simulator.simulate(&mut StdRng::seed_from_u64(9)).unwrap();

    let drawn: Vec<f64> = result.years.iter().map(|y| y.annual_return).collect();
    assert_eq!(drawn, vec![0.10, -0.05, 0.10, -0.05, 0.10]);
    for (year, expected) in result.years.iter().zip(drawn.iter()) {
        let start = (year.year as usize - 1) * MONTHS_PER_YEAR;
        let months = &result.months[start..start + MONTHS_PER_YEAR];
        let product: f64 = months.iter().map(|m| m.stock_factor).product();
        assert_relative_eq!(product, 1.0 + expected, max_relative = 1e-9);
    }
}

#[test]
fn test_exhausted_search_yields_no_result() {
    let series = AnnualReturnSeries::new(vec![1.0]).unwrap();
    let config = SimulationConfig {
        factor_ratio: 1e-6,
        max_search_iterations: 50,
        ..single_year_config()
    };
    let simulator = PortfolioSimulator::new(series, config).unwrap();

    match simulator.simulate(&mut StdRng::seed_from_u64(1)) {
        Err(ProjectionError::SearchExhausted { target, attempts, .. }) => {
            assert_relative_eq!(target, 2.0);
            assert_eq!(attempts, 50);
        }
        other => panic!("expected SearchExhausted, got {:?}", other.map(|r| r.months.len())),
    }
}
