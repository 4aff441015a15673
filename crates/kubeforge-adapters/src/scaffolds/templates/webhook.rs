//! Admission webhooks.
//!
//! Layouts 2 and 3 put the webhook next to the API types and implement the
//! legacy `Defaulter`/`Validator` interfaces on the type itself. Layout 4
//! generates a separate package with custom defaulter/validator structs.

pub const WEBHOOK_INLINE: &str = r#"{{ boilerplate }}

package {{ resource.version }}

import (
	ctrl "sigs.k8s.io/controller-runtime"
	logf "sigs.k8s.io/controller-runtime/pkg/log"
	"sigs.k8s.io/controller-runtime/pkg/webhook"
{%- if extra.validation %}
	"k8s.io/apimachinery/pkg/runtime"
{%- endif %}
)

// log is for logging in this package.
var {{ lower(resource.kind) }}log = logf.Log.WithName("{{ lower(resource.kind) }}-resource")

// SetupWebhookWithManager registers the webhook for {{ resource.kind }} in the manager.
func (r *{{ resource.kind }}) SetupWebhookWithManager(mgr ctrl.Manager) error {
	return ctrl.NewWebhookManagedBy(mgr).
		For(r).
		Complete()
}
{%- if extra.defaulting %}

// +kubebuilder:webhook:path=/mutate-{{ extra.webhook_path }},mutating=true,failurePolicy=fail,sideEffects=None,groups={{ resource.qualified_group }},resources={{ resource.plural }},verbs=create;update,versions={{ resource.version }},name=m{{ lower(resource.kind) }}.kb.io,admissionReviewVersions=v1

var _ webhook.Defaulter = &{{ resource.kind }}{}

// Default implements webhook.Defaulter so a webhook will be registered for the type
func (r *{{ resource.kind }}) Default() {
	{{ lower(resource.kind) }}log.Info("default", "name", r.Name)
}
{%- endif %}
{%- if extra.validation %}

// +kubebuilder:webhook:path=/validate-{{ extra.webhook_path }},mutating=false,failurePolicy=fail,sideEffects=None,groups={{ resource.qualified_group }},resources={{ resource.plural }},verbs=create;update,versions={{ resource.version }},name=v{{ lower(resource.kind) }}.kb.io,admissionReviewVersions=v1

var _ webhook.Validator = &{{ resource.kind }}{}

// ValidateCreate implements webhook.Validator so a webhook will be registered for the type
func (r *{{ resource.kind }}) ValidateCreate() error {
	{{ lower(resource.kind) }}log.Info("validate create", "name", r.Name)
	return nil
}

// ValidateUpdate implements webhook.Validator so a webhook will be registered for the type
func (r *{{ resource.kind }}) ValidateUpdate(old runtime.Object) error {
	{{ lower(resource.kind) }}log.Info("validate update", "name", r.Name)
	return nil
}

// ValidateDelete implements webhook.Validator so a webhook will be registered for the type
func (r *{{ resource.kind }}) ValidateDelete() error {
	{{ lower(resource.kind) }}log.Info("validate delete", "name", r.Name)
	return nil
}
{%- endif %}
"#;

pub const WEBHOOK_PACKAGE: &str = r#"{{ boilerplate }}

package {{ resource.version }}

import (
	"context"
	"fmt"

	"k8s.io/apimachinery/pkg/runtime"
	ctrl "sigs.k8s.io/controller-runtime"
	logf "sigs.k8s.io/controller-runtime/pkg/log"
	"sigs.k8s.io/controller-runtime/pkg/webhook"
{%- if extra.validation %}
	"sigs.k8s.io/controller-runtime/pkg/webhook/admission"
{%- endif %}

	{{ resource.import_alias }} "{{ resource.package }}"
)

var {{ lower(resource.kind) }}log = logf.Log.WithName("{{ lower(resource.kind) }}-resource")

// Setup{{ resource.kind }}WebhookWithManager registers the webhook for {{ resource.kind }} in the manager.
func Setup{{ resource.kind }}WebhookWithManager(mgr ctrl.Manager) error {
	return ctrl.NewWebhookManagedBy(mgr).For(&{{ resource.import_alias }}.{{ resource.kind }}{}).
{%- if extra.validation %}
		WithValidator(&{{ resource.kind }}CustomValidator{}).
{%- endif %}
{%- if extra.defaulting %}
		WithDefaulter(&{{ resource.kind }}CustomDefaulter{}).
{%- endif %}
		Complete()
}
{%- if extra.defaulting %}

// +kubebuilder:webhook:path=/mutate-{{ extra.webhook_path }},mutating=true,failurePolicy=fail,sideEffects=None,groups={{ resource.qualified_group }},resources={{ resource.plural }},verbs=create;update,versions={{ resource.version }},name=m{{ lower(resource.kind) }}-{{ resource.version }}.kb.io,admissionReviewVersions=v1

// {{ resource.kind }}CustomDefaulter sets default values on {{ resource.kind }} objects.
type {{ resource.kind }}CustomDefaulter struct{}

var _ webhook.CustomDefaulter = &{{ resource.kind }}CustomDefaulter{}

// Default implements webhook.CustomDefaulter.
func (d *{{ resource.kind }}CustomDefaulter) Default(ctx context.Context, obj runtime.Object) error {
	r, ok := obj.(*{{ resource.import_alias }}.{{ resource.kind }})
	if !ok {
		return fmt.Errorf("expected a {{ resource.kind }} object but got %T", obj)
	}
	{{ lower(resource.kind) }}log.Info("defaulting", "name", r.GetName())
	return nil
}
{%- endif %}
{%- if extra.validation %}

// +kubebuilder:webhook:path=/validate-{{ extra.webhook_path }},mutating=false,failurePolicy=fail,sideEffects=None,groups={{ resource.qualified_group }},resources={{ resource.plural }},verbs=create;update,versions={{ resource.version }},name=v{{ lower(resource.kind) }}-{{ resource.version }}.kb.io,admissionReviewVersions=v1

// {{ resource.kind }}CustomValidator validates {{ resource.kind }} objects on create, update and delete.
type {{ resource.kind }}CustomValidator struct{}

var _ webhook.CustomValidator = &{{ resource.kind }}CustomValidator{}

// ValidateCreate implements webhook.CustomValidator.
func (v *{{ resource.kind }}CustomValidator) ValidateCreate(ctx context.Context, obj runtime.Object) (admission.Warnings, error) {
	r, ok := obj.(*{{ resource.import_alias }}.{{ resource.kind }})
	if !ok {
		return nil, fmt.Errorf("expected a {{ resource.kind }} object but got %T", obj)
	}
	{{ lower(resource.kind) }}log.Info("validate create", "name", r.GetName())
	return nil, nil
}

// ValidateUpdate implements webhook.CustomValidator.
func (v *{{ resource.kind }}CustomValidator) ValidateUpdate(ctx context.Context, oldObj, newObj runtime.Object) (admission.Warnings, error) {
	r, ok := newObj.(*{{ resource.import_alias }}.{{ resource.kind }})
	if !ok {
		return nil, fmt.Errorf("expected a {{ resource.kind }} object but got %T", newObj)
	}
	{{ lower(resource.kind) }}log.Info("validate update", "name", r.GetName())
	return nil, nil
}

// ValidateDelete implements webhook.CustomValidator.
func (v *{{ resource.kind }}CustomValidator) ValidateDelete(ctx context.Context, obj runtime.Object) (admission.Warnings, error) {
	r, ok := obj.(*{{ resource.import_alias }}.{{ resource.kind }})
	if !ok {
		return nil, fmt.Errorf("expected a {{ resource.kind }} object but got %T", obj)
	}
	{{ lower(resource.kind) }}log.Info("validate delete", "name", r.GetName())
	return nil, nil
}
{%- endif %}
"#;
