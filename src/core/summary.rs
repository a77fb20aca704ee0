use std::{fmt::Display, io::Write};

use serde::{Deserialize, Serialize};

use crate::{core::Bounds, DVector, Float};

/// A struct that holds the results of a particle swarm optimization run.
///
/// Besides the best point found, the summary carries the full replay data of the run: the
/// position of every particle at the start of each iteration and the best value known after each
/// iteration's evaluation phase.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SwarmSummary {
    /// The best position found by the swarm.
    pub x: DVector<Float>,
    /// The fitness at [`SwarmSummary::x`].
    pub fx: Float,
    /// For each iteration, every particle's position before that iteration's update.
    pub history: Vec<Vec<DVector<Float>>>,
    /// For each iteration, the global best value after that iteration's evaluation phase.
    pub cost_history: Vec<Float>,
    /// The bounds of the search space.
    pub bounds: Bounds,
    /// The names of the parameters. This is `None` if no names were set.
    pub parameter_names: Option<Vec<String>>,
    /// A message set by the algorithm (empty for a run which used its full iteration budget).
    pub message: String,
    /// The number of fitness evaluations.
    pub cost_evals: usize,
    /// The number of completed iterations.
    pub iterations: usize,
}

impl SwarmSummary {
    /// Set the names associated with each parameter.
    pub fn with_parameter_names(mut self, parameter_names: &[String]) -> Self {
        self.parameter_names = Some(parameter_names.to_vec());
        self
    }

    /// The name of each parameter, falling back to `x_0`, `x_1`, ... when none were set.
    pub fn names(&self) -> Vec<String> {
        self.parameter_names.clone().unwrap_or_else(|| {
            (0..self.x.len()).map(|i| format!("x_{}", i)).collect()
        })
    }

    /// Serialize the summary as a Python pickle, e.g. for plotting the run with matplotlib.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_pickle::Error`] if serialization or writing fails.
    pub fn write_pickle<W: Write>(&self, writer: &mut W) -> Result<(), serde_pickle::Error> {
        serde_pickle::to_writer(writer, self, Default::default())
    }
}

fn rule(left: char, segments: &[(usize, char)], fill: char, right: char) -> String {
    let mut line = String::from(left);
    for (i, (width, joint)) in segments.iter().enumerate() {
        line.extend(std::iter::repeat(fill).take(*width));
        if i + 1 < segments.len() {
            line.push(*joint);
        }
    }
    line.push(right);
    line
}

impl Display for SwarmSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let columns = |joints: [char; 4]| {
            [
                (13, joints[0]),
                (38, joints[1]),
                (14, joints[2]),
                (14, joints[3]),
                (11, ' '),
            ]
        };
        let mut lines = vec![
            rule('╒', &[(94, ' ')], '═', '╕'),
            format!("│{:^94}│", "SWARM RESULTS"),
            rule('╞', &[(64, '╤'), (29, ' ')], '═', '╡'),
            format!(
                "│ {:<62} │ fval: {:+12.3E}          │",
                format!(
                    "Iterations: {}   Evaluations: {}",
                    self.iterations, self.cost_evals
                ),
                self.fx
            ),
            rule('├', &[(64, '┴'), (29, ' ')], '─', '┤'),
            format!("│ Message: {:<83.83} │", self.message),
            rule('├', &columns(['╥', '╥', '┬', '┬']), '─', '┤'),
            format!(
                "│ {:<11} ║ {:<36} ║ {:>12} │ {:>12} │ {:^9} │",
                "Parameter", "Value", "-Bound", "+Bound", "At Limit?"
            ),
            rule('├', &columns(['╫', '╫', '┼', '┼']), '─', '┤'),
        ];
        for ((name, xi), bound) in self.names().iter().zip(self.x.iter()).zip(self.bounds.iter()) {
            lines.push(format!(
                "│ {:<11.11} ║ {:<36} ║ {:>+12.3E} │ {:>+12.3E} │ {:^9} │",
                name,
                format!("{:+.8E}", xi),
                bound.lower(),
                bound.upper(),
                if bound.at_bound(*xi) { "yes" } else { "" }
            ));
        }
        lines.push(rule('└', &columns(['╨', '╨', '┴', '┴']), '─', '┘'));
        write!(f, "{}", lines.join("\n"))
    }
}
