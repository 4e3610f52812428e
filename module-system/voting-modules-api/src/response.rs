/// Response type for the `Module::call` method.
/// Results meant for observers travel as events in the working set.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct CallResponse {}
