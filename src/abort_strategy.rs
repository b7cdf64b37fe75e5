use crate::{memory::*, square_distance, Center};

/// Reason a running calculation stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
	/// The iteration bound was reached.
	/// ## Fields:
	/// - **iterations**: Amount of assignment/update cycles performed
	MaxIterations { iterations: usize },
	/// The summed squared center movement of the last iteration was within the convergence radius.
	/// ## Fields:
	/// - **iterations**: Amount of assignment/update cycles performed
	Converged { iterations: usize },
}
impl Termination {
	pub fn iterations(&self) -> usize {
		match *self {
			Termination::MaxIterations { iterations } | Termination::Converged { iterations } => iterations
		}
	}
}

/// Summed squared (plain euclidean) distance between every current center and its
/// counterpart from the previous iteration.
pub(crate) fn check_convergence<T: Primitive>(current: &[Center<T>], last: &[Center<T>]) -> T {
	current.iter().zip(last.iter())
		.map(|(c, l)| square_distance(&c.feature, &l.feature))
		.sum()
}

/// ## Returns
/// - **Some** reason if the calculation should stop
/// - **None** if the calculation should continue
///
/// The iteration bound takes precedence. Without a history (before the first update) the
/// convergence radius is not consulted.
pub(crate) fn termination_reason<T: Primitive>(current_iter: usize, max_iteration: usize, radius: T,
		current: &[Center<T>], last: Option<&[Center<T>]>) -> Option<Termination> {
	if current_iter >= max_iteration {
		return Some(Termination::MaxIterations { iterations: current_iter });
	}
	match last {
		Some(last) if check_convergence(current, last) <= radius => Some(Termination::Converged { iterations: current_iter }),
		_ => None
	}
}
