/// Reusable UI components

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FieldRowProps {
    pub label: AttrValue,
    pub value: AttrValue,
}

#[function_component(FieldRow)]
pub fn field_row(props: &FieldRowProps) -> Html {
    html! {
        <div class="field-row">
            <span class="field-label">{&props.label}</span>
            <span class="field-value">{&props.value}</span>
        </div>
    }
}
