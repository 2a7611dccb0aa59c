//! Dashboard screen - progress bar, totals, deadline countdown and spending breakdown.

use crate::{
    core::{
        currency::format_currency,
        dashboard::{self, DashboardSummary},
    },
    entities::objective,
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::fmt::Write;

/// Dashboard for the active objective.
#[derive(Debug, Clone)]
pub struct DashboardScreen {
    summary: DashboardSummary,
}

impl DashboardScreen {
    /// Wraps an already computed summary.
    #[must_use]
    pub const fn new(summary: DashboardSummary) -> Self {
        Self { summary }
    }

    /// Loads the objective's data and summarizes it as of `today`.
    pub async fn load(
        db: &DatabaseConnection,
        objective: &objective::Model,
        today: NaiveDate,
    ) -> Result<Self> {
        Ok(Self::new(
            dashboard::generate_dashboard(db, objective, today, Some(5)).await?,
        ))
    }

    /// The underlying numbers.
    #[must_use]
    pub const fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    /// Text rendering of the page.
    pub fn render(&self) -> Result<String> {
        let s = &self.summary;
        let money = |amount| format_currency(amount, s.currency);
        let mut out = String::new();

        writeln!(out, "{}", s.objective.name)?;
        if let Some(description) = &s.objective.description {
            writeln!(out, "{description}")?;
        }
        writeln!(
            out,
            "{} {} de {}",
            dashboard::format_progress_bar(s.progress_percent, Some(20)),
            money(s.saved),
            money(s.objective.target_amount)
        )?;
        writeln!(out, "Faltam {}", money(s.remaining))?;
        writeln!(
            out,
            "Entradas {} | Saídas {}",
            money(s.income_total),
            money(s.expense_total)
        )?;

        match s.days_left {
            d if d > 0 => writeln!(out, "Prazo: {d} dias restantes")?,
            0 => writeln!(out, "Prazo: hoje")?,
            d => writeln!(out, "Prazo: vencido há {} dias", -d)?,
        }

        writeln!(
            out,
            "Marcos concluídos: {}/{}",
            s.milestones_completed, s.milestones_total
        )?;

        if !s.categories.is_empty() {
            writeln!(out, "Gastos por categoria:")?;
            for share in &s.categories {
                writeln!(
                    out,
                    "  {:<14} {:>3}%  {}",
                    share.category,
                    share.percent,
                    money(share.amount)
                )?;
            }
        }

        Ok(out)
    }
}
