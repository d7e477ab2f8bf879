use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CashPosition, Holding};

/// Aggregate valuation of the portfolio in the reporting currency.
///
/// Intermediate sums stay unrounded; only the two reporting totals are
/// rounded to whole currency units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valuation {
    pub foreign_stock_value: Decimal,
    pub foreign_stock_cost: Decimal,
    pub domestic_stock_value: Decimal,
    pub domestic_stock_cost: Decimal,
    pub foreign_cash: Decimal,
    pub domestic_cash: Decimal,
    /// Cost basis converted to the reporting currency, whole units.
    pub total_cost: Decimal,
    /// Market value converted to the reporting currency, whole units.
    pub grand_total: Decimal,
}

fn stock_value(holdings: &[Holding]) -> Decimal {
    holdings
        .iter()
        .map(|h| h.shares * h.price.unwrap_or(Decimal::ZERO))
        .sum()
}

fn stock_cost(holdings: &[Holding]) -> Decimal {
    holdings
        .iter()
        .map(|h| h.shares * h.cost.unwrap_or(Decimal::ZERO))
        .sum()
}

fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Values the portfolio at `fx_rate` reporting units per foreign unit.
///
/// A holding with no recorded price contributes zero market value but still
/// contributes its cost, and the other way around; absent fields are never
/// an error. Pure function of its inputs.
pub fn value_portfolio(
    foreign: &[Holding],
    domestic: &[Holding],
    cash: &[CashPosition],
    fx_rate: Decimal,
    foreign_currency: &str,
) -> Valuation {
    let foreign_stock_value = stock_value(foreign);
    let foreign_stock_cost = stock_cost(foreign);
    let domestic_stock_value = stock_value(domestic);
    let domestic_stock_cost = stock_cost(domestic);

    let mut foreign_cash = Decimal::ZERO;
    let mut domestic_cash = Decimal::ZERO;
    for position in cash {
        if position.is_in(foreign_currency) {
            foreign_cash += position.amount;
        } else {
            domestic_cash += position.amount;
        }
    }

    let total_cost = round_whole(
        fx_rate * (foreign_stock_cost + foreign_cash) + domestic_stock_cost + domestic_cash,
    );

    let foreign_assets = foreign_stock_value + foreign_cash;
    let domestic_assets = domestic_stock_value + domestic_cash;
    let grand_total = round_whole(fx_rate * foreign_assets + domestic_assets);

    Valuation {
        foreign_stock_value,
        foreign_stock_cost,
        domestic_stock_value,
        domestic_stock_cost,
        foreign_cash,
        domestic_cash,
        total_cost,
        grand_total,
    }
}
