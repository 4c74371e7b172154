//! Read-side projections. Each call loads the current collection, so a
//! subscriber that received a change event just calls these again.

use jiff::civil::Date;

use super::CareEngine;
use crate::{
    calendar::{self, CalendarCell, Direction, ViewMode},
    error::Result,
    metrics::CareMetrics,
    models::UserContext,
    resolver::{self, PlantAgenda},
};

impl CareEngine {
    /// Due and completed tasks per plant on `date`.
    pub async fn agenda(&self, user: &UserContext, date: Date) -> Vec<PlantAgenda> {
        let plants = self.load_plants(user).await;
        resolver::agenda_for_day(&plants, date, self.today(), &self.time_zone())
    }

    /// Cells of the week containing `anchor`, starting on the configured day.
    pub async fn week(&self, user: &UserContext, anchor: Date) -> Result<Vec<CalendarCell>> {
        let plants = self.load_plants(user).await;
        calendar::populate_week(
            &plants,
            anchor,
            self.settings.week_start,
            self.today(),
            &self.time_zone(),
        )
    }

    /// Padded month grid for the month containing `anchor`.
    pub async fn month(
        &self,
        user: &UserContext,
        anchor: Date,
    ) -> Result<Vec<[Option<CalendarCell>; 7]>> {
        let plants = self.load_plants(user).await;
        calendar::populate_month(
            &plants,
            anchor,
            self.settings.week_start,
            self.today(),
            &self.time_zone(),
        )
    }

    pub async fn metrics(&self, user: &UserContext) -> Result<CareMetrics> {
        let plants = self.load_plants(user).await;
        CareMetrics::project(&plants, self.today(), &self.time_zone())
    }

    /// Next anchor for a calendar view, or `None` past the allowed range.
    pub fn navigate(
        &self,
        current: Date,
        mode: ViewMode,
        direction: Direction,
    ) -> Result<Option<Date>> {
        calendar::navigate(
            current,
            mode,
            direction,
            self.today(),
            self.settings.navigation_horizon_months,
        )
    }
}
