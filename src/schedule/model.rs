//! Solver-independent constraint model.
//!
//! Every relation is an integer linear (in)equality over binary and bounded
//! integer variables, so implications are written as inequalities
//! (`a <= b` for `a => b`) and any CP or MIP backend can consume the model.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    Binary,
    Integer { lower: i64, upper: i64 },
}

impl Domain {
    pub fn contains(&self, value: i64) -> bool {
        match *self {
            Domain::Binary => value == 0 || value == 1,
            Domain::Integer { lower, upper } => lower <= value && value <= upper,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Variable {
    pub name: String,
    pub domain: Domain,
}

/// `constant + Σ coef * var`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearExpr {
    pub terms: Vec<(i64, VarId)>,
    pub constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        LinearExpr::default()
    }

    pub fn from_terms<I: IntoIterator<Item = (i64, VarId)>>(terms: I) -> Self {
        LinearExpr {
            terms: terms.into_iter().collect(),
            constant: 0,
        }
    }

    pub fn sum<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        Self::from_terms(vars.into_iter().map(|v| (1, v)))
    }

    pub fn add_term(&mut self, coef: i64, var: VarId) {
        if coef != 0 {
            self.terms.push((coef, var));
        }
    }

    pub fn evaluate(&self, values: &[i64]) -> i64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, (coef, var)| acc + coef * values[var.index()])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    LessEq,
    Equal,
    GreaterEq,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::LessEq => write!(f, "<="),
            Relation::Equal => write!(f, "=="),
            Relation::GreaterEq => write!(f, ">="),
        }
    }
}

/// Which encoder produced a constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    OneGate,
    Conflict,
    TerminalUsage,
    TerminalSpread,
    GateUsage,
    GateSpread,
    Preference,
    Connection,
}

#[derive(Clone, Debug)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: i64,
}

impl Constraint {
    pub fn is_satisfied(&self, values: &[i64]) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::LessEq => lhs <= self.rhs,
            Relation::Equal => lhs == self.rhs,
            Relation::GreaterEq => lhs >= self.rhs,
        }
    }
}

/// Variables, constraints and a linear objective to maximise.
#[derive(Clone, Debug, Default)]
pub struct Model {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
}

impl Model {
    pub fn new() -> Self {
        Model::default()
    }

    pub fn new_bool(&mut self, name: impl Into<String>) -> VarId {
        self.push_var(name.into(), Domain::Binary)
    }

    pub fn new_int(&mut self, name: impl Into<String>, lower: i64, upper: i64) -> VarId {
        debug_assert!(lower <= upper, "empty integer domain");
        self.push_var(name.into(), Domain::Integer { lower, upper })
    }

    fn push_var(&mut self, name: String, domain: Domain) -> VarId {
        self.variables.push(Variable { name, domain });
        VarId(self.variables.len() - 1)
    }

    pub fn add(&mut self, kind: ConstraintKind, expr: LinearExpr, relation: Relation, rhs: i64) {
        self.constraints.push(Constraint {
            kind,
            expr,
            relation,
            rhs,
        });
    }

    pub fn less_eq(&mut self, kind: ConstraintKind, expr: LinearExpr, rhs: i64) {
        self.add(kind, expr, Relation::LessEq, rhs)
    }

    pub fn equal(&mut self, kind: ConstraintKind, expr: LinearExpr, rhs: i64) {
        self.add(kind, expr, Relation::Equal, rhs)
    }

    pub fn greater_eq(&mut self, kind: ConstraintKind, expr: LinearExpr, rhs: i64) {
        self.add(kind, expr, Relation::GreaterEq, rhs)
    }

    pub fn maximise(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, var: VarId) -> &Variable {
        &self.variables[var.index()]
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn count(&self, kind: ConstraintKind) -> usize {
        self.constraints.iter().filter(|c| c.kind == kind).count()
    }

    /// Checks a full value vector against every domain and constraint.
    pub fn is_feasible(&self, values: &[i64]) -> bool {
        values.len() == self.variables.len()
            && self
                .variables
                .iter()
                .zip(values)
                .all(|(v, x)| v.domain.contains(*x))
            && self.constraints.iter().all(|c| c.is_satisfied(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implication_as_inequality() {
        let mut model = Model::new();
        let assign = model.new_bool("assign");
        let violation = model.new_bool("violation");
        model.less_eq(
            ConstraintKind::Preference,
            LinearExpr::from_terms([(1, assign), (-1, violation)]),
            0,
        );

        assert!(model.is_feasible(&[0, 0]));
        assert!(model.is_feasible(&[0, 1]));
        assert!(model.is_feasible(&[1, 1]));
        assert!(!model.is_feasible(&[1, 0]));
    }

    #[test]
    fn test_domains_are_checked() {
        let mut model = Model::new();
        model.new_int("usage", 0, 3);
        assert!(model.is_feasible(&[3]));
        assert!(!model.is_feasible(&[4]));
        assert!(!model.is_feasible(&[]));
    }

    #[test]
    fn test_evaluate_with_constant() {
        let mut model = Model::new();
        let a = model.new_int("a", 0, 10);
        let b = model.new_int("b", 0, 10);
        let mut expr = LinearExpr::sum([a, b]);
        expr.add_term(-3, b);
        expr.constant = 7;
        assert_eq!(7 + 4 + 5 - 15, expr.evaluate(&[4, 5]));
    }
}
