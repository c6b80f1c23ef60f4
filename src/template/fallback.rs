use crate::classifier::classify;
use crate::template::derive_title;

/// Generic issue skeleton for input with no similar enough template.
///
/// The raw input goes verbatim into the description; every other section
/// holds placeholder text, followed by a fixed five item task list.
/// Never fails.
pub fn generate_fallback(raw_input: &str) -> String {
    let category = classify(raw_input);
    let title = derive_title(raw_input);
    format!(
        "## {category}: {title}

### Description
{raw_input}

### Environment
- **Platform**: [Specify platform]
- **Component**: [Specify component]

### Steps to Reproduce
1. [Step 1]
2. [Step 2]
3. [Step 3]

### Expected Behavior
[Describe what should happen]

### Actual Behavior
[Describe what actually happens]

### Error Logs
```
[Add relevant logs here]
```

### Proposed Tasks
- [ ] Investigate the issue
- [ ] Identify root cause
- [ ] Implement fix
- [ ] Add tests
- [ ] Verify fix works"
    )
}
