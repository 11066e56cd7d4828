//! Fixed chart palettes and per-category color assignment.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct Palette(&'static [&'static str]);

pub const DERIVATIVES: Palette = Palette(&["#b8c1e7", "#4e63c2", "#8291d3", "#273261", "#374587"]);

pub const ASSETS: Palette = Palette(&[
    "#000032", "#7485cf", "#cdd2e2", "#8291d3", "#374587", "#b08ce8", "#65409b", "#482e70",
    "#905cdf", "#4dadaa", "#00615f", "#004644", "#008b87", "#ffeb87",
]);

pub const STRATEGY: Palette = Palette(&[
    "#000032", "#273261", "#4e63c2", "#7485cf", "#b8c1e7", "#cdd2e2", "#d6c2ec", "#905cdf",
    "#b08ce8", "#65409b", "#8ac4bb", "#4dadaa", "#00615f", "#004644", "#008b87", "#ffeb87",
]);

impl Palette {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Color for the `index`-th category, cycling past the end.
    pub fn color(&self, index: usize) -> &'static str {
        self.0[index % self.0.len()]
    }

    /// One color per distinct category in order of first appearance; repeated
    /// categories reuse their color.
    pub fn assign<'a, I>(&self, categories: I) -> Vec<&'static str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut slots: HashMap<&'a str, usize> = HashMap::new();
        categories
            .into_iter()
            .map(|cat| {
                let next = slots.len();
                let slot = *slots.entry(cat).or_insert(next);
                self.color(slot)
            })
            .collect()
    }
}
