//! Eco fact pop-ups at distance milestones
//!
//! Only the fact id is simulated; the text lives with the presentation layer.

use rand::Rng;

use super::state::{ActiveFact, GameEvent, GameState};

impl GameState {
    /// Show a fact; timed facts hide themselves after `fact_duration`
    pub fn show_fact(&mut self, id: u8) {
        self.active_fact = Some(ActiveFact { id, remaining: None });
        self.emit(GameEvent::FactShown { id });
    }

    pub fn hide_fact(&mut self) {
        if self.active_fact.take().is_some() {
            self.emit(GameEvent::FactHidden);
        }
    }

    /// Count down the visible fact and pop a new one on each fresh milestone
    pub fn update_facts(&mut self, dt: f32) {
        let expired = match self.active_fact.as_mut().and_then(|f| f.remaining.as_mut()) {
            Some(remaining) => {
                *remaining -= dt;
                *remaining <= 0.0
            }
            None => false,
        };
        if expired {
            self.hide_fact();
        }

        let milestone = (self.distance / f64::from(self.tuning.fact_milestone)).floor() as u32;
        if milestone > 0 && milestone != self.fact_milestone && self.tuning.fact_count > 0 {
            self.fact_milestone = milestone;
            let id = self.rng.random_range(1..=self.tuning.fact_count);
            self.show_fact(id);
            if let Some(fact) = self.active_fact.as_mut() {
                fact.remaining = Some(self.tuning.fact_duration);
            }
        }
    }
}
