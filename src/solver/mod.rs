//! MILP formulation and solve for seat assignment.
//!
//! Builds a fully binary integer program from diners, restaurants, days,
//! and reservations, hands it to the MILP backend, and decodes the
//! solution vector back into domain assignments.
//!
//! # Model
//!
//! - `x[d,r,t]` — diner d seated at restaurant r on day t
//! - `y[r,t]` — slot-used indicator (one-shot mode only)
//! - `both[p,r,t]` — both diners of pair p co-located at (r,t)
//! - `overlap[p]` — pair p co-located on two or more distinct days
//!
//! Satisfaction is maximized by minimizing its negation; repeated pairings
//! are discouraged by a small objective penalty on `overlap`, never by a
//! hard constraint. The pairwise diversity block is quadratic in diner
//! count and quadratic in day count — fine for event-sized inputs, the
//! first thing to disable if the model ever grows beyond them.
//!
//! # Reference
//! Wolsey (1998), "Integer Programming", Ch. 1.3 (product linearization)

mod index;

use std::collections::{HashMap, HashSet};

use good_lp::{default_solver, variable, variables, Expression, Solution, SolverModel, Variable};
use tracing::{debug, warn};

use crate::advisor;
use crate::models::{Assignment, Diner, PlanResult, Reservation, ReservationStatus};
use crate::prefs::PreferenceMatrix;

use index::{PairTable, VarGrid};

/// Soft objective penalty for excluded placements. The hard per-variable
/// pin (x = 0) is the real guarantee; this keeps the objective pointing
/// the same way if the pin is ever relaxed.
const EXCLUSION_PENALTY: f64 = 1e6;

/// Input container for one optimization run.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Participants with their ratings.
    pub diners: Vec<Diner>,
    /// Restaurant universe, in input order.
    pub restaurants: Vec<String>,
    /// Event days, in input order (lowercase).
    pub days: Vec<String>,
    /// Known reservations in any status.
    pub reservations: Vec<Reservation>,
    /// Smallest group worth seating at one restaurant.
    pub min_group_size: u32,
    /// Largest group a restaurant is asked to hold.
    pub max_group_size: u32,
    /// Plan speculatively as if any restaurant could be booked.
    pub one_shot: bool,
    /// Diversity penalty override; `None` = scale-adaptive default,
    /// 0.0 disables the penalty entirely.
    pub diversity_weight: Option<f64>,
}

impl PlanRequest {
    /// Creates a request with default group sizes (4..8) and no reservations.
    pub fn new(diners: Vec<Diner>, restaurants: Vec<String>, days: Vec<String>) -> Self {
        Self {
            diners,
            restaurants,
            days,
            reservations: Vec::new(),
            min_group_size: 4,
            max_group_size: 8,
            one_shot: false,
            diversity_weight: None,
        }
    }

    /// Sets the reservations.
    pub fn with_reservations(mut self, reservations: Vec<Reservation>) -> Self {
        self.reservations = reservations;
        self
    }

    /// Sets the group size bounds.
    pub fn with_group_sizes(mut self, min: u32, max: u32) -> Self {
        self.min_group_size = min;
        self.max_group_size = max;
        self
    }

    /// Enables one-shot planning mode.
    pub fn with_one_shot(mut self, one_shot: bool) -> Self {
        self.one_shot = one_shot;
        self
    }

    /// Overrides the diversity penalty weight.
    pub fn with_diversity_weight(mut self, weight: f64) -> Self {
        self.diversity_weight = Some(weight);
        self
    }
}

/// Builds the assignment MILP from a request and solves it.
///
/// Normalizes preferences once at construction; `solve` is then a pure
/// build → solve → decode pass, so independent runs can proceed in
/// parallel with no shared state.
pub struct AssignmentModelBuilder<'a> {
    request: &'a PlanRequest,
    prefs: PreferenceMatrix,
    /// (restaurant, day) → confirmed capacity.
    confirmed: HashMap<(String, String), u32>,
    /// Slots the advisor must never propose.
    unavailable: HashSet<(String, String)>,
}

impl<'a> AssignmentModelBuilder<'a> {
    /// Creates a builder, normalizing preferences and indexing reservations.
    pub fn new(request: &'a PlanRequest) -> Self {
        let prefs = PreferenceMatrix::normalize(&request.diners, &request.restaurants);

        let mut confirmed = HashMap::new();
        let mut unavailable = HashSet::new();
        for res in &request.reservations {
            let key = (res.restaurant.clone(), res.day.clone());
            match res.status {
                ReservationStatus::Confirmed => {
                    confirmed.insert(key, res.capacity);
                }
                ReservationStatus::Unavailable => {
                    unavailable.insert(key);
                }
                ReservationStatus::Pending => {}
            }
        }

        Self {
            request,
            prefs,
            confirmed,
            unavailable,
        }
    }

    /// The normalized preference matrix for this run.
    pub fn preferences(&self) -> &PreferenceMatrix {
        &self.prefs
    }

    /// Builds the model, solves it, and decodes the result.
    ///
    /// Infeasibility is not an error: the result carries an empty
    /// assignment list and the advisor's suggestion still points at the
    /// next reservation worth pursuing. Constraints are never relaxed.
    pub fn solve(&self) -> PlanResult {
        let diners = &self.request.diners;
        let restaurants = &self.request.restaurants;
        let days = &self.request.days;
        let (n_d, n_r, n_t) = (diners.len(), restaurants.len(), days.len());

        let grid = VarGrid::new(n_d, n_r, n_t);
        let pairs = PairTable::new(n_d);
        let pair_grid = VarGrid::new(pairs.count(), n_r, n_t);

        let mut vars = variables!();
        let x: Vec<Variable> = (0..grid.len()).map(|_| vars.add(variable().binary())).collect();
        // Slot-used indicators exist only in one-shot mode; slot-major
        // layout (restaurant, then day).
        let y: Option<Vec<Variable>> = self
            .request
            .one_shot
            .then(|| (0..n_r * n_t).map(|_| vars.add(variable().binary())).collect());
        let both: Vec<Variable> = (0..pair_grid.len())
            .map(|_| vars.add(variable().binary()))
            .collect();
        let overlap: Vec<Variable> = (0..pairs.count())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let lambda = self
            .request
            .diversity_weight
            .unwrap_or_else(|| 0.1 * self.prefs.mean_abs_score().unwrap_or(1.0));

        // Objective: minimize negated satisfaction plus diversity penalty.
        let mut objective = Expression::with_capacity(x.len() + overlap.len());
        for d in 0..n_d {
            for r in 0..n_r {
                match self.prefs.score(d, r) {
                    Some(score) => {
                        for t in 0..n_t {
                            objective.add_mul(-score, x[grid.index(d, r, t)]);
                        }
                    }
                    None => {
                        for t in 0..n_t {
                            objective.add_mul(EXCLUSION_PENALTY, x[grid.index(d, r, t)]);
                        }
                    }
                }
            }
        }
        for &overlap_var in &overlap {
            objective.add_mul(lambda, overlap_var);
        }

        debug!(
            assignment_vars = x.len(),
            both_vars = both.len(),
            overlap_vars = overlap.len(),
            lambda,
            one_shot = self.request.one_shot,
            "assignment model built"
        );

        let mut problem = vars.minimise(objective).using(default_solver);

        let min_size = self.request.min_group_size as f64;
        let max_size = self.request.max_group_size as f64;
        let slot_sum = |r: usize, t: usize| {
            let mut seated = Expression::with_capacity(n_d);
            for d in 0..n_d {
                seated.add_mul(1.0, x[grid.index(d, r, t)]);
            }
            seated
        };

        // 1. Exactly one restaurant per diner per day. Days with no
        // reachable restaurant make the model infeasible; partial days
        // are not modeled.
        for d in 0..n_d {
            for t in 0..n_t {
                let mut row = Expression::with_capacity(n_r);
                for r in 0..n_r {
                    row.add_mul(1.0, x[grid.index(d, r, t)]);
                }
                problem = problem.with(row.eq(1.0));
            }
        }

        // 2. No repeat restaurant across days.
        for d in 0..n_d {
            for r in 0..n_r {
                let mut row = Expression::with_capacity(n_t);
                for t in 0..n_t {
                    row.add_mul(1.0, x[grid.index(d, r, t)]);
                }
                problem = problem.with(row.leq(1.0));
            }
        }

        // 3. Per-slot capacity. Confirmed: min_size ≤ seated ≤ capacity.
        // One-shot without a booking: seated = 0 or min ≤ seated ≤ max,
        // via the y indicator (max_size is already a tight bound on the
        // sum, so no separate big-M). Otherwise: nobody without a booking.
        for r in 0..n_r {
            for t in 0..n_t {
                let key = (restaurants[r].clone(), days[t].clone());
                if let Some(&capacity) = self.confirmed.get(&key) {
                    problem = problem.with(slot_sum(r, t).geq(min_size));
                    problem = problem.with(slot_sum(r, t).leq(capacity as f64));
                } else if let Some(y) = &y {
                    let used = y[r * n_t + t];
                    let mut upper = slot_sum(r, t);
                    upper.add_mul(-max_size, used);
                    problem = problem.with(upper.leq(0.0));
                    let mut lower = Expression::with_capacity(n_d + 1);
                    lower.add_mul(min_size, used);
                    for d in 0..n_d {
                        lower.add_mul(-1.0, x[grid.index(d, r, t)]);
                    }
                    problem = problem.with(lower.leq(0.0));
                } else {
                    problem = problem.with(slot_sum(r, t).eq(0.0));
                }
            }
        }

        // 4. Hard exclusions: pin x to zero for every excluded pairing,
        // independent of the objective penalty.
        for d in 0..n_d {
            for r in 0..n_r {
                if self.prefs.is_excluded(d, r) {
                    for t in 0..n_t {
                        problem = problem.with(linear(&[(1.0, x[grid.index(d, r, t)])]).eq(0.0));
                    }
                }
            }
        }

        // 5. AND-linearization of both[p,r,t] = x1 ∧ x2. Exact because
        // both operands are binary.
        for (p, (d1, d2)) in pairs.iter().enumerate() {
            for r in 0..n_r {
                for t in 0..n_t {
                    let b = both[pair_grid.index(p, r, t)];
                    let x1 = x[grid.index(d1, r, t)];
                    let x2 = x[grid.index(d2, r, t)];
                    problem = problem.with(linear(&[(1.0, b), (-1.0, x1)]).leq(0.0));
                    problem = problem.with(linear(&[(1.0, b), (-1.0, x2)]).leq(0.0));
                    problem =
                        problem.with(linear(&[(1.0, x1), (1.0, x2), (-1.0, b)]).leq(1.0));
                }
            }
        }

        // 6. Overlap detection: for every day pair, co-location on both
        // days forces overlap[p] up. Σ_r both[p,r,t] is 0 or 1 since a
        // diner holds at most one restaurant per day.
        for p in 0..pairs.count() {
            for t1 in 0..n_t {
                for t2 in (t1 + 1)..n_t {
                    let mut row = Expression::with_capacity(2 * n_r + 1);
                    row.add_mul(-1.0, overlap[p]);
                    for r in 0..n_r {
                        row.add_mul(1.0, both[pair_grid.index(p, r, t1)]);
                        row.add_mul(1.0, both[pair_grid.index(p, r, t2)]);
                    }
                    problem = problem.with(row.leq(1.0));
                }
            }
        }

        // The advisor runs regardless of solver outcome.
        let suggestion = advisor::suggest_reservation(
            &self.prefs,
            restaurants,
            days,
            &self.confirmed,
            &self.unavailable,
            self.request.min_group_size,
            self.request.max_group_size,
        );

        match problem.solve() {
            Ok(solution) => {
                let (assignments, total_satisfaction) = self.decode(&solution, &x, &grid);
                let repeated_pairings = count_repeated_pairings(&assignments, days);
                PlanResult {
                    assignments,
                    total_satisfaction,
                    repeated_pairings,
                    suggestion,
                }
            }
            Err(err) => {
                warn!(%err, "no feasible assignment");
                PlanResult {
                    assignments: Vec::new(),
                    total_satisfaction: 0.0,
                    repeated_pairings: 0,
                    suggestion,
                }
            }
        }
    }

    /// Decodes the solution vector into assignments.
    ///
    /// Thresholding at 0.5 recovers the integral value of each binary
    /// variable. The recorded score comes from the preference matrix, not
    /// the objective; an excluded placement (which constraint 4 should
    /// make impossible) is floored to 0.0.
    fn decode(
        &self,
        solution: &impl Solution,
        x: &[Variable],
        grid: &VarGrid,
    ) -> (Vec<Assignment>, f64) {
        let mut assignments = Vec::new();
        let mut total = 0.0;

        for (d, diner) in self.request.diners.iter().enumerate() {
            for (r, restaurant) in self.request.restaurants.iter().enumerate() {
                for (t, day) in self.request.days.iter().enumerate() {
                    if solution.value(x[grid.index(d, r, t)]) > 0.5 {
                        let score = self.prefs.score(d, r);
                        assignments.push(Assignment::new(
                            diner.email.clone(),
                            restaurant.clone(),
                            day.clone(),
                            score.unwrap_or(0.0),
                        ));
                        if let Some(score) = score {
                            total += score;
                        }
                    }
                }
            }
        }

        (assignments, total)
    }
}

/// Builds and solves the assignment model for a request.
pub fn optimize(request: &PlanRequest) -> PlanResult {
    AssignmentModelBuilder::new(request).solve()
}

/// Counts diner pairs co-located on two or more distinct days.
///
/// Always recomputed from realized assignments. The model's `overlap`
/// variables are lower-bounded penalty carriers: the solver may legally
/// leave one at 0 when the penalty is not worth paying, so they are not
/// authoritative.
pub fn count_repeated_pairings(assignments: &[Assignment], days: &[String]) -> usize {
    let mut days_together: HashMap<(&str, &str), HashSet<&str>> = HashMap::new();

    for day in days {
        let mut by_restaurant: HashMap<&str, Vec<&str>> = HashMap::new();
        for a in assignments.iter().filter(|a| a.day == *day) {
            by_restaurant
                .entry(a.restaurant.as_str())
                .or_default()
                .push(a.diner.as_str());
        }
        for group in by_restaurant.values_mut() {
            group.sort_unstable();
            for i in 0..group.len() {
                for j in (i + 1)..group.len() {
                    days_together
                        .entry((group[i], group[j]))
                        .or_default()
                        .insert(day.as_str());
                }
            }
        }
    }

    days_together.values().filter(|d| d.len() >= 2).count()
}

fn linear(terms: &[(f64, Variable)]) -> Expression {
    let mut expr = Expression::with_capacity(terms.len());
    for &(coef, var) in terms {
        expr.add_mul(coef, var);
    }
    expr
}
