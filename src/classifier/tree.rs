use super::encoder::EncodedRow;
use super::rng::SimpleRng;
use crate::config::TreeParams;
use crate::data::model::Tier;

const N_CLASSES: usize = Tier::ALL.len();

type ClassCounts = [usize; N_CLASSES];

// ---------------------------------------------------------------------------
// Tree structure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        tier: Tier,
    },
    Split {
        feature: usize,
        threshold: f64,
        /// Where rows with a missing value for `feature` go.
        missing_left: bool,
        left: usize,
        right: usize,
    },
}

/// A CART classification tree using gini impurity.
///
/// Missing feature values are routed per split: the side that gave the lower
/// impurity while fitting, or the larger child when the feature had no
/// missing values at that node.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_features: usize,
    depth: usize,
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    missing_left: bool,
    score: f64,
}

impl DecisionTree {
    /// Grow a tree over `x` (one encoded row per sample) and `y`.
    /// Callers guarantee `x` is non-empty and as long as `y`.
    pub fn fit(x: &[EncodedRow], y: &[Tier], params: &TreeParams) -> Self {
        let n_features = x.first().map_or(0, Vec::len);
        let mut builder = Builder {
            x,
            y,
            params,
            rng: SimpleRng::new(params.seed),
            nodes: Vec::new(),
            depth: 0,
            features: (0..n_features).collect(),
        };
        let all: Vec<usize> = (0..x.len()).collect();
        builder.grow(all, 0);

        DecisionTree {
            nodes: builder.nodes,
            n_features,
            depth: builder.depth,
        }
    }

    pub fn predict(&self, row: &EncodedRow) -> Tier {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { tier } => return *tier,
                Node::Split {
                    feature,
                    threshold,
                    missing_left,
                    left,
                    right,
                } => {
                    let go_left = match row.get(*feature).copied().flatten() {
                        Some(v) => v <= *threshold,
                        None => *missing_left,
                    };
                    idx = if go_left { *left } else { *right };
                }
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

// ---------------------------------------------------------------------------
// Fitting
// ---------------------------------------------------------------------------

struct Builder<'a> {
    x: &'a [EncodedRow],
    y: &'a [Tier],
    params: &'a TreeParams,
    rng: SimpleRng,
    nodes: Vec<Node>,
    depth: usize,
    features: Vec<usize>,
}

impl Builder<'_> {
    /// Append the subtree for `samples` and return its root index.
    fn grow(&mut self, samples: Vec<usize>, depth: usize) -> usize {
        self.depth = self.depth.max(depth);
        let counts = self.class_counts(&samples);
        let idx = self.nodes.len();
        self.nodes.push(leaf(&counts));

        let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        if pure || depth >= self.params.max_depth || samples.len() < self.params.min_samples_split {
            return idx;
        }

        let Some(split) = self.best_split(&samples) else {
            return idx;
        };

        let (left_samples, right_samples): (Vec<usize>, Vec<usize>) =
            samples.iter().partition(|&&s| {
                match self.x[s][split.feature] {
                    Some(v) => v <= split.threshold,
                    None => split.missing_left,
                }
            });

        let missing_left = if self.has_missing(&samples, split.feature) {
            split.missing_left
        } else {
            left_samples.len() >= right_samples.len()
        };

        let left = self.grow(left_samples, depth + 1);
        let right = self.grow(right_samples, depth + 1);
        self.nodes[idx] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            missing_left,
            left,
            right,
        };
        idx
    }

    fn class_counts(&self, samples: &[usize]) -> ClassCounts {
        let mut counts = [0; N_CLASSES];
        for &s in samples {
            counts[self.y[s].index()] += 1;
        }
        counts
    }

    fn has_missing(&self, samples: &[usize], feature: usize) -> bool {
        samples.iter().any(|&s| self.x[s][feature].is_none())
    }

    /// Best split over a seeded permutation of the features. A later
    /// candidate only wins when strictly better.
    fn best_split(&mut self, samples: &[usize]) -> Option<Split> {
        let mut order = self.features.clone();
        self.rng.shuffle(&mut order);

        let mut best: Option<Split> = None;
        let mut present: Vec<(f64, Tier)> = Vec::with_capacity(samples.len());

        for feature in order {
            present.clear();
            let mut missing = [0; N_CLASSES];
            for &s in samples {
                match self.x[s][feature] {
                    Some(v) => present.push((v, self.y[s])),
                    None => missing[self.y[s].index()] += 1,
                }
            }
            if present.is_empty() {
                continue;
            }
            present.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

            let candidate = self.scan_feature(feature, &present, &missing);
            if let Some(c) = candidate {
                if best.map_or(true, |b| c.score > b.score + 1e-12) {
                    best = Some(c);
                }
            }
        }

        best
    }

    /// Sweep the sorted values of one feature, trying both routings for
    /// missing values at every threshold.
    fn scan_feature(
        &self,
        feature: usize,
        present: &[(f64, Tier)],
        missing: &ClassCounts,
    ) -> Option<Split> {
        let mut total = [0; N_CLASSES];
        for (_, t) in present {
            total[t.index()] += 1;
        }
        let n_missing: usize = missing.iter().sum();
        let min_leaf = self.params.min_samples_leaf.max(1);

        let mut best: Option<Split> = None;
        let mut consider = |threshold: f64, left: &ClassCounts| {
            let right = sub(&total, left);
            let routings: &[bool] = if n_missing > 0 { &[true, false] } else { &[true] };
            for &missing_left in routings {
                let (l, r) = if missing_left {
                    (add(left, missing), right)
                } else {
                    (*left, add(&right, missing))
                };
                if sum(&l) < min_leaf || sum(&r) < min_leaf {
                    continue;
                }
                let score = gini_proxy(&l) + gini_proxy(&r);
                if best.map_or(true, |b| score > b.score + 1e-12) {
                    best = Some(Split {
                        feature,
                        threshold,
                        missing_left,
                        score,
                    });
                }
            }
        };

        let mut left = [0; N_CLASSES];
        for i in 0..present.len() - 1 {
            left[present[i].1.index()] += 1;
            let (lo, hi) = (present[i].0, present[i + 1].0);
            if hi <= lo {
                continue;
            }
            let mut threshold = lo + (hi - lo) / 2.0;
            if threshold >= hi {
                threshold = lo;
            }
            consider(threshold, &left);
        }

        // Present vs missing, when every present value is equal.
        if n_missing > 0 {
            consider(f64::INFINITY, &total);
        }

        best
    }
}

fn leaf(counts: &ClassCounts) -> Node {
    // Ties go to the lowest tier.
    let mut best = 0;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[best] {
            best = i;
        }
    }
    Node::Leaf {
        tier: Tier::ALL[best],
    }
}

/// `sum(c_k^2) / n`: larger means lower weighted gini impurity.
fn gini_proxy(counts: &ClassCounts) -> f64 {
    let n = sum(counts);
    if n == 0 {
        return 0.0;
    }
    counts.iter().map(|&c| (c * c) as f64).sum::<f64>() / n as f64
}

fn sum(counts: &ClassCounts) -> usize {
    counts.iter().sum()
}

fn add(a: &ClassCounts, b: &ClassCounts) -> ClassCounts {
    std::array::from_fn(|i| a[i] + b[i])
}

fn sub(a: &ClassCounts, b: &ClassCounts) -> ClassCounts {
    std::array::from_fn(|i| a[i] - b[i])
}
