//! A small first-order unification engine in the miniKanren style.
//!
//! Relations are functions from terms to goals; applying a goal to a
//! substitution yields a lazy, finite, forward-only sequence of extended
//! substitutions. The engine is generic over the value type `V` and knows
//! nothing about WordNet; `crate::relations` instantiates it for the
//! lexical domain.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

// --- Variables and terms ---

/// A logic variable. Every call to [`Var::fresh`] yields a distinct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var(u64);

impl Var {
    /// Allocates a variable distinct from every other in the process.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Var(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_{}", self.0)
    }
}

/// Either an unbound variable or a concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term<V> {
    Var(Var),
    Val(V),
}

impl<V> Term<V> {
    pub fn val(value: V) -> Self {
        Term::Val(value)
    }

    /// The concrete value, if this term carries one.
    pub fn value(&self) -> Option<&V> {
        match self {
            Term::Val(v) => Some(v),
            Term::Var(_) => None,
        }
    }
}

impl<V> From<Var> for Term<V> {
    fn from(var: Var) -> Self {
        Term::Var(var)
    }
}

// --- Substitutions ---

/// A triangular substitution: variable bindings extended immutably, one
/// binding at a time. Cloning is cheap because query-scale maps hold only
/// a handful of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Subst<V> {
    bindings: HashMap<Var, Term<V>>,
}

impl<V> Default for Subst<V> {
    fn default() -> Self {
        Subst {
            bindings: HashMap::new(),
        }
    }
}

impl<V> Subst<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<V: Clone + PartialEq> Subst<V> {
    /// Follows variable bindings until reaching a value or an unbound
    /// variable. This is the engine's resolution step.
    pub fn walk(&self, term: &Term<V>) -> Term<V> {
        let mut current = term;
        loop {
            match current {
                Term::Var(var) => match self.bindings.get(var) {
                    Some(next) => current = next,
                    None => return current.clone(),
                },
                Term::Val(_) => return current.clone(),
            }
        }
    }

    /// Extends the substitution so both terms denote the same thing, or
    /// returns `None` when they cannot.
    pub fn unify(&self, a: &Term<V>, b: &Term<V>) -> Option<Self> {
        let a = self.walk(a);
        let b = self.walk(b);
        match (a, b) {
            (Term::Var(x), Term::Var(y)) if x == y => Some(self.clone()),
            (Term::Var(x), other) => Some(self.extended(x, other)),
            (other, Term::Var(y)) => Some(self.extended(y, other)),
            (Term::Val(u), Term::Val(v)) => (u == v).then(|| self.clone()),
        }
    }

    fn extended(&self, var: Var, term: Term<V>) -> Self {
        let mut next = self.clone();
        next.bindings.insert(var, term);
        next
    }
}

// --- Goals ---

/// A lazily pulled sequence of solutions. Finite for every goal this crate
/// constructs; dropping it abandons the query.
pub type Solutions<V> = Box<dyn Iterator<Item = Subst<V>>>;

pub fn no_solution<V: 'static>() -> Solutions<V> {
    Box::new(std::iter::empty())
}

pub fn singleton<V: 'static>(subst: Subst<V>) -> Solutions<V> {
    Box::new(std::iter::once(subst))
}

/// A goal: applied to a substitution, produces the solutions extending it.
/// Cheap to clone; a goal may be applied any number of times, each
/// application restarting the enumeration from scratch.
pub struct Goal<V>(Rc<dyn Fn(&Subst<V>) -> Solutions<V>>);

impl<V> Clone for Goal<V> {
    fn clone(&self) -> Self {
        Goal(Rc::clone(&self.0))
    }
}

impl<V: Clone + PartialEq + 'static> Goal<V> {
    pub fn new(f: impl Fn(&Subst<V>) -> Solutions<V> + 'static) -> Self {
        Goal(Rc::new(f))
    }

    /// Applies the goal to a substitution.
    pub fn solve(&self, subst: &Subst<V>) -> Solutions<V> {
        (self.0)(subst)
    }

    /// Applies the goal to the empty substitution.
    pub fn run(&self) -> Solutions<V> {
        self.solve(&Subst::new())
    }

    /// Conjunction: solutions of `self`, each further extended by `other`.
    pub fn and(self, other: Goal<V>) -> Goal<V> {
        Goal::new(move |subst| {
            let other = other.clone();
            Box::new(
                self.solve(subst)
                    .flat_map(move |extended| other.solve(&extended)),
            )
        })
    }

    /// Disjunction: solutions of `self`, then solutions of `other`. The
    /// second branch is not evaluated until the first is exhausted.
    pub fn or(self, other: Goal<V>) -> Goal<V> {
        Goal::new(move |subst| {
            let other = other.clone();
            let base = subst.clone();
            Box::new(
                self.solve(subst)
                    .chain(std::iter::once(base).flat_map(move |s| other.solve(&s))),
            )
        })
    }
}

/// The goal that always succeeds once, extending nothing.
pub fn succeed<V: Clone + PartialEq + 'static>() -> Goal<V> {
    Goal::new(|subst| singleton(subst.clone()))
}

/// The goal that never succeeds.
pub fn fail<V: Clone + PartialEq + 'static>() -> Goal<V> {
    Goal::new(|_| no_solution())
}

/// Unifies two terms: at most one solution.
pub fn eq<V: Clone + PartialEq + 'static>(
    a: impl Into<Term<V>>,
    b: impl Into<Term<V>>,
) -> Goal<V> {
    let a = a.into();
    let b = b.into();
    Goal::new(move |subst| match subst.unify(&a, &b) {
        Some(extended) => singleton(extended),
        None => no_solution(),
    })
}

/// Nondeterministically unifies `term` against each candidate in turn, one
/// solution per successful match, in candidate order.
pub fn membero<V: Clone + PartialEq + 'static>(
    term: impl Into<Term<V>>,
    candidates: Vec<Term<V>>,
) -> Goal<V> {
    let term = term.into();
    Goal::new(move |subst| {
        let term = term.clone();
        let subst = subst.clone();
        Box::new(
            candidates
                .clone()
                .into_iter()
                .filter_map(move |candidate| subst.unify(&term, &candidate)),
        )
    })
}

/// Negation as failure: succeeds (without extending anything) exactly when
/// `goal` has no solutions.
pub fn not<V: Clone + PartialEq + 'static>(goal: Goal<V>) -> Goal<V> {
    Goal::new(move |subst| {
        if goal.solve(subst).next().is_some() {
            no_solution()
        } else {
            singleton(subst.clone())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn val(n: i32) -> Term<i32> {
        Term::val(n)
    }

    #[test]
    fn fresh_vars_are_distinct() {
        let x = Var::fresh();
        let y = Var::fresh();
        assert_ne!(x, y);
        assert_ne!(x.to_string(), y.to_string());
        assert!(x.to_string().starts_with('_'));
    }

    #[test]
    fn walk_follows_binding_chains() {
        let x = Var::fresh();
        let y = Var::fresh();
        let s = Subst::new()
            .unify(&x.into(), &y.into())
            .unwrap()
            .unify(&y.into(), &val(42))
            .unwrap();
        assert_eq!(s.len(), 2);
        assert!(!s.is_empty());
        assert_eq!(s.walk(&x.into()), val(42));
        assert_eq!(s.walk(&y.into()), val(42));
    }

    #[test]
    fn walk_leaves_unbound_variables_alone() {
        let x = Var::fresh();
        let s: Subst<i32> = Subst::new();
        assert_eq!(s.walk(&x.into()), Term::Var(x));
    }

    #[test]
    fn unify_binds_either_side() {
        let x = Var::fresh();
        let s = Subst::<i32>::new();
        assert!(s.unify(&x.into(), &val(1)).is_some());
        assert!(s.unify(&val(1), &x.into()).is_some());
        assert!(s.unify(&val(1), &val(1)).is_some());
        assert!(s.unify(&val(1), &val(2)).is_none());
    }

    #[test]
    fn unify_respects_existing_bindings() {
        let x = Var::fresh();
        let s = Subst::new().unify(&x.into(), &val(1)).unwrap();
        assert!(s.unify(&x.into(), &val(1)).is_some());
        assert!(s.unify(&x.into(), &val(2)).is_none());
    }

    #[test]
    fn eq_yields_at_most_one_solution() {
        let x = Var::fresh();
        let solutions: Vec<_> = eq(x, val(7)).run().collect();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].walk(&x.into()), val(7));

        assert_eq!(eq(val(1), val(2)).run().count(), 0);
    }

    #[test]
    fn membero_enumerates_candidates_in_order() {
        let x = Var::fresh();
        let goal = membero(x, vec![val(1), val(2), val(3)]);
        let seen: Vec<_> = goal
            .run()
            .map(|s| s.walk(&x.into()).value().copied().unwrap())
            .collect();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn membero_filters_against_bound_term() {
        let x = Var::fresh();
        let goal = eq(x, val(2)).and(membero(x, vec![val(1), val(2), val(3)]));
        assert_eq!(goal.run().count(), 1);
    }

    #[test]
    fn membero_is_reusable_across_applications() {
        let x = Var::fresh();
        let goal = membero(x, vec![val(1), val(2)]);
        assert_eq!(goal.run().count(), 2);
        assert_eq!(goal.run().count(), 2);
    }

    #[test]
    fn and_threads_substitutions() {
        let x = Var::fresh();
        let y = Var::fresh();
        let solutions: Vec<_> = eq(x, val(1)).and(eq(y, val(2))).run().collect();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].walk(&x.into()), val(1));
        assert_eq!(solutions[0].walk(&y.into()), val(2));

        assert_eq!(eq(x, val(1)).and(eq(x, val(2))).run().count(), 0);
    }

    #[test]
    fn or_appends_solution_sequences() {
        let x = Var::fresh();
        let seen: Vec<_> = eq(x, val(1))
            .or(eq(x, val(2)))
            .run()
            .map(|s| s.walk(&x.into()).value().copied().unwrap())
            .collect();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn succeed_and_fail_behave() {
        assert_eq!(succeed::<i32>().run().count(), 1);
        assert_eq!(fail::<i32>().run().count(), 0);
    }

    #[test]
    fn not_inverts_solvability() {
        let x = Var::fresh();
        assert_eq!(not(fail::<i32>()).run().count(), 1);
        assert_eq!(not(eq(x, val(1))).run().count(), 0);

        // A negated goal leaves no bindings behind.
        let solutions: Vec<_> = not(eq(val(1), val(2))).run().collect();
        assert!(solutions[0].is_empty());
    }

    #[test]
    fn solutions_are_pulled_lazily() {
        let x = Var::fresh();
        let goal = membero(x, vec![val(1), val(2), val(3)]);
        let first = goal.run().next().unwrap();
        assert_eq!(first.walk(&x.into()), val(1));
    }
}
