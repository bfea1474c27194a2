//! Portfolio state tracking for a single simulation run

/// Running balances and totals, mutated only by the simulator loop
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioState {
    /// Stock balance after the latest month's growth
    pub stock_balance: f64,

    /// Bond balance (contributions plus settled annual interest)
    pub bond_balance: f64,

    /// Product of every monthly stock factor applied so far
    pub cumulative_stock_return_rate: f64,

    /// Sum of all funds injected
    pub total_contributed: f64,

    /// Bond contributions received in the current year (interest base)
    pub year_bond_contributions: f64,
}

impl PortfolioState {
    /// Fresh state for the start of a run
    pub fn new() -> Self {
        Self {
            stock_balance: 0.0,
            bond_balance: 0.0,
            cumulative_stock_return_rate: 1.0,
            total_contributed: 0.0,
            year_bond_contributions: 0.0,
        }
    }

    /// Reset the per-year bond interest base
    pub fn begin_year(&mut self) {
        self.year_bond_contributions = 0.0;
    }

    /// Inject this month's funds and apply the month's stock growth
    ///
    /// New stock money participates in the same month's compounding; bond
    /// money only accumulates until the year-end settlement.
    pub fn apply_month(&mut self, funds: f64, stock_ratio: f64, stock_factor: f64) {
        let stock_portion = funds * stock_ratio;
        let bond_portion = funds - stock_portion;

        self.stock_balance = (self.stock_balance + stock_portion) * stock_factor;
        self.bond_balance += bond_portion;
        self.year_bond_contributions += bond_portion;

        self.total_contributed += funds;
        self.cumulative_stock_return_rate *= stock_factor;
    }

    /// Settle annual bond interest on this year's bond contributions
    ///
    /// Returns the interest credited.
    pub fn settle_bond_interest(&mut self, bond_annual_rate: f64) -> f64 {
        let interest = self.year_bond_contributions * bond_annual_rate;
        self.bond_balance += interest;
        interest
    }

    /// Combined stock and bond value
    pub fn total_property(&self) -> f64 {
        self.stock_balance + self.bond_balance
    }

    /// Return on investment, `property / contributed - 1`
    pub fn total_roi(&self) -> f64 {
        if self.total_contributed == 0.0 {
            0.0
        } else {
            self.total_property() / self.total_contributed - 1.0
        }
    }
}

impl Default for PortfolioState {
    fn default() -> Self {
        Self::new()
    }
}
