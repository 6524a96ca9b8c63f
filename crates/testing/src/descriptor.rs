// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Sample `modelDescription.xml` documents

/// One real output variable with reference 5 and no parameters.
pub const SINGLE_OUTPUT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fmiModelDescription fmiVersion="2.0" modelName="single" guid="{single-0001}">
	<CoSimulation modelIdentifier="single"/>
	<ModelVariables>
		<ScalarVariable name="y" valueReference="5" causality="output" variability="continuous" description="the output">
			<Real/>
		</ScalarVariable>
	</ModelVariables>
</fmiModelDescription>
"#;

/// Describes the component in [`crate::component::FIXTURE_WAT`].
pub const FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fmiModelDescription fmiVersion="2.0" modelName="fixture" guid="{fixture-0001}" description="recording test component">
	<CoSimulation modelIdentifier="fixture" canHandleVariableCommunicationStepSize="true"/>
	<DefaultExperiment startTime="0" stopTime="1" stepSize="0.1"/>
	<ModelVariables>
		<ScalarVariable name="time" valueReference="0" causality="independent" variability="continuous">
			<Real/>
		</ScalarVariable>
		<ScalarVariable name="enabled" valueReference="1" causality="input" variability="discrete">
			<Boolean start="false"/>
		</ScalarVariable>
		<ScalarVariable name="u" valueReference="5" causality="input" variability="continuous">
			<Real start="0"/>
		</ScalarVariable>
		<ScalarVariable name="v" valueReference="6" causality="input" variability="continuous">
			<Real start="0"/>
		</ScalarVariable>
		<ScalarVariable name="y" valueReference="7" causality="output" variability="continuous" initial="calculated">
			<Real/>
		</ScalarVariable>
		<ScalarVariable name="gain" valueReference="8" causality="parameter" variability="fixed" initial="exact">
			<Real start="2"/>
		</ScalarVariable>
		<ScalarVariable name="setRealCalls" valueReference="100" causality="local" variability="discrete">
			<Real/>
		</ScalarVariable>
		<ScalarVariable name="setRealCount" valueReference="101" causality="local" variability="discrete">
			<Real/>
		</ScalarVariable>
		<ScalarVariable name="setRealFirst" valueReference="102" causality="local" variability="discrete">
			<Real/>
		</ScalarVariable>
		<ScalarVariable name="setBooleanCalls" valueReference="103" causality="local" variability="discrete">
			<Real/>
		</ScalarVariable>
		<ScalarVariable name="setBooleanCount" valueReference="104" causality="local" variability="discrete">
			<Real/>
		</ScalarVariable>
		<ScalarVariable name="doStepCalls" valueReference="105" causality="local" variability="discrete">
			<Real/>
		</ScalarVariable>
		<ScalarVariable name="setRealSequence" valueReference="106" causality="local" variability="discrete">
			<Real/>
		</ScalarVariable>
		<ScalarVariable name="setBooleanSequence" valueReference="107" causality="local" variability="discrete">
			<Real/>
		</ScalarVariable>
	</ModelVariables>
</fmiModelDescription>
"#;

/// [`FIXTURE`] with the `guid` removed; the component refuses to instantiate.
pub const FIXTURE_WITHOUT_GUID: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fmiModelDescription fmiVersion="2.0" modelName="fixture">
	<CoSimulation modelIdentifier="fixture"/>
</fmiModelDescription>
"#;

/// The identifier points at entry points the fixture component does not export.
pub const UNKNOWN_IDENTIFIER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fmiModelDescription fmiVersion="2.0" modelName="other" guid="{other-0001}">
	<CoSimulation modelIdentifier="other"/>
</fmiModelDescription>
"#;
