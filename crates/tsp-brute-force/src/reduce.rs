use tsp_core::BestTour;

/// Fold over local bests. The first folded value seeds the accumulator;
/// every later one replaces it only when strictly shorter, so among equal
/// tours the earliest folded wins.
#[derive(Debug, Default)]
pub struct GlobalReducer {
    best: Option<BestTour>,
    folded: usize,
}

impl GlobalReducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, local: BestTour) {
        self.folded += 1;
        match &mut self.best {
            Some(best) => {
                best.merge(local);
            }
            None => self.best = Some(local),
        }
    }

    pub fn folded(&self) -> usize {
        self.folded
    }

    /// `None` when nothing was folded.
    pub fn finish(self) -> Option<BestTour> {
        self.best
    }
}
