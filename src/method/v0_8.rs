//! AMQP 0-8 method table.
//!
//! Includes the `file`, `stream`, `dtx`, `tunnel` and `test` classes that
//! 0-9-1 dropped, plus the `exchange.bound` query.

use crate::protocol::ProtocolVersion;

amqp_methods! {
    version: ProtocolVersion::V0_8;

    // connection
    ConnectionStart = (10, 10, "connection.start") => dispatch_connection_start {
        version_major: Octet,
        version_minor: Octet,
        server_properties: Table,
        mechanisms: LongStr,
        locales: LongStr,
    }
    ConnectionStartOk = (10, 11, "connection.start-ok") => dispatch_connection_start_ok {
        client_properties: Table,
        mechanism: ShortStr,
        response: LongStr,
        locale: ShortStr,
    }
    ConnectionSecure = (10, 20, "connection.secure") => dispatch_connection_secure {
        challenge: LongStr,
    }
    ConnectionSecureOk = (10, 21, "connection.secure-ok") => dispatch_connection_secure_ok {
        response: LongStr,
    }
    ConnectionTune = (10, 30, "connection.tune") => dispatch_connection_tune {
        channel_max: Short,
        frame_max: Long,
        heartbeat: Short,
    }
    ConnectionTuneOk = (10, 31, "connection.tune-ok") => dispatch_connection_tune_ok {
        channel_max: Short,
        frame_max: Long,
        heartbeat: Short,
    }
    ConnectionOpen = (10, 40, "connection.open") => dispatch_connection_open {
        virtual_host: ShortStr,
        capabilities: ShortStr,
        insist: Bit,
    }
    ConnectionOpenOk = (10, 41, "connection.open-ok") => dispatch_connection_open_ok {
        known_hosts: ShortStr,
    }
    ConnectionRedirect = (10, 50, "connection.redirect") => dispatch_connection_redirect {
        host: ShortStr,
        known_hosts: ShortStr,
    }
    ConnectionClose = (10, 60, "connection.close") => dispatch_connection_close {
        reply_code: Short,
        reply_text: ShortStr,
        class_id: Short,
        method_id: Short,
    }
    ConnectionCloseOk = (10, 61, "connection.close-ok") => dispatch_connection_close_ok {}

    // channel
    ChannelOpen = (20, 10, "channel.open") => dispatch_channel_open {
        out_of_band: ShortStr,
    }
    ChannelOpenOk = (20, 11, "channel.open-ok") => dispatch_channel_open_ok {}
    ChannelFlow = (20, 20, "channel.flow") => dispatch_channel_flow {
        active: Bit,
    }
    ChannelFlowOk = (20, 21, "channel.flow-ok") => dispatch_channel_flow_ok {
        active: Bit,
    }
    ChannelAlert = (20, 30, "channel.alert") => dispatch_channel_alert {
        reply_code: Short,
        reply_text: ShortStr,
        details: Table,
    }
    ChannelClose = (20, 40, "channel.close") => dispatch_channel_close {
        reply_code: Short,
        reply_text: ShortStr,
        class_id: Short,
        method_id: Short,
    }
    ChannelCloseOk = (20, 41, "channel.close-ok") => dispatch_channel_close_ok {}

    // access
    AccessRequest = (30, 10, "access.request") => dispatch_access_request {
        realm: ShortStr,
        exclusive: Bit,
        passive: Bit,
        active: Bit,
        write: Bit,
        read: Bit,
    }
    AccessRequestOk = (30, 11, "access.request-ok") => dispatch_access_request_ok {
        ticket: Short,
    }

    // exchange
    ExchangeDeclare = (40, 10, "exchange.declare") => dispatch_exchange_declare {
        ticket: Short,
        exchange: ShortStr,
        exchange_type: ShortStr,
        passive: Bit,
        durable: Bit,
        auto_delete: Bit,
        internal: Bit,
        nowait: Bit,
        arguments: Table,
    }
    ExchangeDeclareOk = (40, 11, "exchange.declare-ok") => dispatch_exchange_declare_ok {}
    ExchangeDelete = (40, 20, "exchange.delete") => dispatch_exchange_delete {
        ticket: Short,
        exchange: ShortStr,
        if_unused: Bit,
        nowait: Bit,
    }
    ExchangeDeleteOk = (40, 21, "exchange.delete-ok") => dispatch_exchange_delete_ok {}
    ExchangeBound = (40, 22, "exchange.bound") => dispatch_exchange_bound {
        exchange: ShortStr,
        routing_key: ShortStr,
        queue: ShortStr,
    }
    ExchangeBoundOk = (40, 23, "exchange.bound-ok") => dispatch_exchange_bound_ok {
        reply_code: Short,
        reply_text: ShortStr,
    }

    // queue
    QueueDeclare = (50, 10, "queue.declare") => dispatch_queue_declare {
        ticket: Short,
        queue: ShortStr,
        passive: Bit,
        durable: Bit,
        exclusive: Bit,
        auto_delete: Bit,
        nowait: Bit,
        arguments: Table,
    }
    QueueDeclareOk = (50, 11, "queue.declare-ok") => dispatch_queue_declare_ok {
        queue: ShortStr,
        message_count: Long,
        consumer_count: Long,
    }
    QueueBind = (50, 20, "queue.bind") => dispatch_queue_bind {
        ticket: Short,
        queue: ShortStr,
        exchange: ShortStr,
        routing_key: ShortStr,
        nowait: Bit,
        arguments: Table,
    }
    QueueBindOk = (50, 21, "queue.bind-ok") => dispatch_queue_bind_ok {}
    QueuePurge = (50, 30, "queue.purge") => dispatch_queue_purge {
        ticket: Short,
        queue: ShortStr,
        nowait: Bit,
    }
    QueuePurgeOk = (50, 31, "queue.purge-ok") => dispatch_queue_purge_ok {
        message_count: Long,
    }
    QueueDelete = (50, 40, "queue.delete") => dispatch_queue_delete {
        ticket: Short,
        queue: ShortStr,
        if_unused: Bit,
        if_empty: Bit,
        nowait: Bit,
    }
    QueueDeleteOk = (50, 41, "queue.delete-ok") => dispatch_queue_delete_ok {
        message_count: Long,
    }

    // basic
    BasicQos = (60, 10, "basic.qos") => dispatch_basic_qos {
        prefetch_size: Long,
        prefetch_count: Short,
        global: Bit,
    }
    BasicQosOk = (60, 11, "basic.qos-ok") => dispatch_basic_qos_ok {}
    BasicConsume = (60, 20, "basic.consume") => dispatch_basic_consume {
        ticket: Short,
        queue: ShortStr,
        consumer_tag: ShortStr,
        no_local: Bit,
        no_ack: Bit,
        exclusive: Bit,
        nowait: Bit,
        arguments: Table,
    }
    BasicConsumeOk = (60, 21, "basic.consume-ok") => dispatch_basic_consume_ok {
        consumer_tag: ShortStr,
    }
    BasicCancel = (60, 30, "basic.cancel") => dispatch_basic_cancel {
        consumer_tag: ShortStr,
        nowait: Bit,
    }
    BasicCancelOk = (60, 31, "basic.cancel-ok") => dispatch_basic_cancel_ok {
        consumer_tag: ShortStr,
    }
    BasicPublish = (60, 40, "basic.publish") => dispatch_basic_publish {
        ticket: Short,
        exchange: ShortStr,
        routing_key: ShortStr,
        mandatory: Bit,
        immediate: Bit,
    }
    BasicReturn = (60, 50, "basic.return") => dispatch_basic_return {
        reply_code: Short,
        reply_text: ShortStr,
        exchange: ShortStr,
        routing_key: ShortStr,
    }
    BasicDeliver = (60, 60, "basic.deliver") => dispatch_basic_deliver {
        consumer_tag: ShortStr,
        delivery_tag: LongLong,
        redelivered: Bit,
        exchange: ShortStr,
        routing_key: ShortStr,
    }
    BasicGet = (60, 70, "basic.get") => dispatch_basic_get {
        ticket: Short,
        queue: ShortStr,
        no_ack: Bit,
    }
    BasicGetOk = (60, 71, "basic.get-ok") => dispatch_basic_get_ok {
        delivery_tag: LongLong,
        redelivered: Bit,
        exchange: ShortStr,
        routing_key: ShortStr,
        message_count: Long,
    }
    BasicGetEmpty = (60, 72, "basic.get-empty") => dispatch_basic_get_empty {
        cluster_id: ShortStr,
    }
    BasicAck = (60, 80, "basic.ack") => dispatch_basic_ack {
        delivery_tag: LongLong,
        multiple: Bit,
    }
    BasicReject = (60, 90, "basic.reject") => dispatch_basic_reject {
        delivery_tag: LongLong,
        requeue: Bit,
    }
    BasicRecover = (60, 100, "basic.recover") => dispatch_basic_recover {
        requeue: Bit,
    }

    // file
    FileQos = (70, 10, "file.qos") => dispatch_file_qos {
        prefetch_size: Long,
        prefetch_count: Short,
        global: Bit,
    }
    FileQosOk = (70, 11, "file.qos-ok") => dispatch_file_qos_ok {}
    FileConsume = (70, 20, "file.consume") => dispatch_file_consume {
        ticket: Short,
        queue: ShortStr,
        consumer_tag: ShortStr,
        no_local: Bit,
        no_ack: Bit,
        exclusive: Bit,
        nowait: Bit,
    }
    FileConsumeOk = (70, 21, "file.consume-ok") => dispatch_file_consume_ok {
        consumer_tag: ShortStr,
    }
    FileCancel = (70, 30, "file.cancel") => dispatch_file_cancel {
        consumer_tag: ShortStr,
        nowait: Bit,
    }
    FileCancelOk = (70, 31, "file.cancel-ok") => dispatch_file_cancel_ok {
        consumer_tag: ShortStr,
    }
    FileOpen = (70, 40, "file.open") => dispatch_file_open {
        identifier: ShortStr,
        content_size: LongLong,
    }
    FileOpenOk = (70, 41, "file.open-ok") => dispatch_file_open_ok {
        staged_size: LongLong,
    }
    FileStage = (70, 50, "file.stage") => dispatch_file_stage {}
    FilePublish = (70, 60, "file.publish") => dispatch_file_publish {
        ticket: Short,
        exchange: ShortStr,
        routing_key: ShortStr,
        mandatory: Bit,
        immediate: Bit,
        identifier: ShortStr,
    }
    FileReturn = (70, 70, "file.return") => dispatch_file_return {
        reply_code: Short,
        reply_text: ShortStr,
        exchange: ShortStr,
        routing_key: ShortStr,
    }
    FileDeliver = (70, 80, "file.deliver") => dispatch_file_deliver {
        consumer_tag: ShortStr,
        delivery_tag: LongLong,
        redelivered: Bit,
        exchange: ShortStr,
        routing_key: ShortStr,
        identifier: ShortStr,
    }
    FileAck = (70, 90, "file.ack") => dispatch_file_ack {
        delivery_tag: LongLong,
        multiple: Bit,
    }
    FileReject = (70, 100, "file.reject") => dispatch_file_reject {
        delivery_tag: LongLong,
        requeue: Bit,
    }

    // stream
    StreamQos = (80, 10, "stream.qos") => dispatch_stream_qos {
        prefetch_size: Long,
        prefetch_count: Short,
        consume_rate: Long,
        global: Bit,
    }
    StreamQosOk = (80, 11, "stream.qos-ok") => dispatch_stream_qos_ok {}
    StreamConsume = (80, 20, "stream.consume") => dispatch_stream_consume {
        ticket: Short,
        queue: ShortStr,
        consumer_tag: ShortStr,
        no_local: Bit,
        exclusive: Bit,
        nowait: Bit,
    }
    StreamConsumeOk = (80, 21, "stream.consume-ok") => dispatch_stream_consume_ok {
        consumer_tag: ShortStr,
    }
    StreamCancel = (80, 30, "stream.cancel") => dispatch_stream_cancel {
        consumer_tag: ShortStr,
        nowait: Bit,
    }
    StreamCancelOk = (80, 31, "stream.cancel-ok") => dispatch_stream_cancel_ok {
        consumer_tag: ShortStr,
    }
    StreamPublish = (80, 40, "stream.publish") => dispatch_stream_publish {
        ticket: Short,
        exchange: ShortStr,
        routing_key: ShortStr,
        mandatory: Bit,
        immediate: Bit,
    }
    StreamReturn = (80, 50, "stream.return") => dispatch_stream_return {
        reply_code: Short,
        reply_text: ShortStr,
        exchange: ShortStr,
        routing_key: ShortStr,
    }
    StreamDeliver = (80, 60, "stream.deliver") => dispatch_stream_deliver {
        consumer_tag: ShortStr,
        delivery_tag: LongLong,
        exchange: ShortStr,
        queue: ShortStr,
    }

    // tx
    TxSelect = (90, 10, "tx.select") => dispatch_tx_select {}
    TxSelectOk = (90, 11, "tx.select-ok") => dispatch_tx_select_ok {}
    TxCommit = (90, 20, "tx.commit") => dispatch_tx_commit {}
    TxCommitOk = (90, 21, "tx.commit-ok") => dispatch_tx_commit_ok {}
    TxRollback = (90, 30, "tx.rollback") => dispatch_tx_rollback {}
    TxRollbackOk = (90, 31, "tx.rollback-ok") => dispatch_tx_rollback_ok {}

    // dtx
    DtxSelect = (100, 10, "dtx.select") => dispatch_dtx_select {}
    DtxSelectOk = (100, 11, "dtx.select-ok") => dispatch_dtx_select_ok {}
    DtxStart = (100, 20, "dtx.start") => dispatch_dtx_start {
        dtx_identifier: ShortStr,
    }
    DtxStartOk = (100, 21, "dtx.start-ok") => dispatch_dtx_start_ok {}

    // tunnel
    TunnelRequest = (110, 10, "tunnel.request") => dispatch_tunnel_request {
        meta_data: Table,
    }

    // test
    TestInteger = (120, 10, "test.integer") => dispatch_test_integer {
        integer_1: Octet,
        integer_2: Short,
        integer_3: Long,
        integer_4: LongLong,
        operation: Octet,
    }
    TestIntegerOk = (120, 11, "test.integer-ok") => dispatch_test_integer_ok {
        result: LongLong,
    }
    TestString = (120, 20, "test.string") => dispatch_test_string {
        string_1: ShortStr,
        string_2: LongStr,
        operation: Octet,
    }
    TestStringOk = (120, 21, "test.string-ok") => dispatch_test_string_ok {
        result: LongStr,
    }
    TestTable = (120, 30, "test.table") => dispatch_test_table {
        table: Table,
        integer_op: Octet,
        string_op: Octet,
    }
    TestTableOk = (120, 31, "test.table-ok") => dispatch_test_table_ok {
        integer_result: LongLong,
        string_result: LongStr,
    }
    TestContent = (120, 40, "test.content") => dispatch_test_content {}
    TestContentOk = (120, 41, "test.content-ok") => dispatch_test_content_ok {
        content_checksum: Long,
    }
}
