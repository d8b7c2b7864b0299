use tracing::debug;

use crate::resolution::context::{ContextValue, ResolutionContext};
use crate::resolution::domain::{
    Combinator, ConditionKind, ConditionOperator, ConditionalLogicTree, LogicCondition,
};

/// Evaluate a conditional gate against the context.
///
/// A condition whose field is absent resolves to `false` and is logged, never
/// raised. Only when every condition is unresolvable does the tree return its
/// configured fallback; otherwise the resolved subset combines normally.
/// An empty condition list yields the combinator identity.
pub(crate) fn evaluate_tree(
    gate_id: &str,
    tree: &ConditionalLogicTree,
    context: &ResolutionContext,
) -> bool {
    let mut any_resolved = false;
    let mut results = Vec::with_capacity(tree.conditions.len());

    for condition in &tree.conditions {
        match resolve_condition(condition, context) {
            Some(outcome) => {
                any_resolved = true;
                results.push(outcome);
            }
            None => {
                debug!(
                    gate = gate_id,
                    field = %condition.field,
                    "condition field unresolved, treated as false"
                );
                results.push(false);
            }
        }
    }

    if !tree.conditions.is_empty() && !any_resolved {
        return tree.fallback;
    }

    match tree.combinator {
        Combinator::All => results.iter().all(|outcome| *outcome),
        Combinator::Any => results.iter().any(|outcome| *outcome),
    }
}

fn resolve_condition(condition: &LogicCondition, context: &ResolutionContext) -> Option<bool> {
    let actual = match condition.kind {
        ConditionKind::Dimension => context.dimension(&condition.field),
        ConditionKind::Custom => context.custom_fields.get(&condition.field).cloned(),
    }?;
    Some(apply_operator(&actual, condition.operator, &condition.value))
}

fn apply_operator(actual: &ContextValue, operator: ConditionOperator, expected: &ContextValue) -> bool {
    match operator {
        ConditionOperator::Equals => actual == expected,
        ConditionOperator::Contains => match (actual, expected) {
            (ContextValue::List(items), ContextValue::Text(needle)) => {
                items.iter().any(|item| item == needle)
            }
            (ContextValue::Text(haystack), ContextValue::Text(needle)) => {
                haystack.contains(needle.as_str())
            }
            _ => false,
        },
        ConditionOperator::GreaterThan => match (actual, expected) {
            (ContextValue::Number(lhs), ContextValue::Number(rhs)) => lhs > rhs,
            _ => false,
        },
        ConditionOperator::LessThan => match (actual, expected) {
            (ContextValue::Number(lhs), ContextValue::Number(rhs)) => lhs < rhs,
            _ => false,
        },
    }
}
